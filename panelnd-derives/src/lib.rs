use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericParam, Ident, LitInt, Path};

/// Names the derive generates on the container or uses as constructor parameters.
/// Axis accessors may not reuse them.
const RESERVED: &[&str] = &[
    "data",
    "copy",
    "get",
    "try_new",
    "try_new_with_dtype",
    "config",
    "frame",
    "into_frame",
    "from_frame",
    "init",
];

/// The parsed `#[panel(...)]` attribute.
#[derive(Default)]
struct PanelAttr {
    axis_orders: Vec<Ident>,
    axis_slices: Vec<(Ident, Ident)>,
    slicer: Option<Path>,
    axis_aliases: Vec<(Ident, Ident)>,
    stat_axis: Option<(usize, Span)>,
    constructor: Option<Path>,
}

fn parse_pairs(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Vec<(Ident, Ident)>> {
    let mut pairs = Vec::new();
    meta.parse_nested_meta(|inner| {
        let from = inner.path.require_ident()?.clone();
        let to: Ident = inner.value()?.parse()?;
        pairs.push((from, to));
        Ok(())
    })?;
    Ok(pairs)
}

impl PanelAttr {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let attr = input
            .attrs
            .iter()
            .find(|a| a.path().is_ident("panel"))
            .ok_or_else(|| {
                syn::Error::new(
                    input.ident.span(),
                    "NdPanel requires a #[panel(axis_orders(...), ...)] attribute",
                )
            })?;
        let mut out = Self::default();
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("axis_orders") {
                meta.parse_nested_meta(|inner| {
                    out.axis_orders.push(inner.path.require_ident()?.clone());
                    Ok(())
                })
            } else if meta.path.is_ident("axis_slices") {
                out.axis_slices = parse_pairs(&meta)?;
                Ok(())
            } else if meta.path.is_ident("axis_aliases") {
                out.axis_aliases = parse_pairs(&meta)?;
                Ok(())
            } else if meta.path.is_ident("slicer") {
                out.slicer = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("stat_axis") {
                let lit: LitInt = meta.value()?.parse()?;
                out.stat_axis = Some((lit.base10_parse()?, lit.span()));
                Ok(())
            } else if meta.path.is_ident("constructor") {
                out.constructor = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown panel option"))
            }
        })?;
        Ok(out)
    }

    /// The same structural rules the runtime builder enforces, reported at compile time.
    /// The slicer's own axis count can only be checked when the record is built.
    fn validate(&self, name: &Ident) -> syn::Result<()> {
        let axes = &self.axis_orders;
        if axes.is_empty() {
            return Err(syn::Error::new(name.span(), "at least one axis is required"));
        }
        for (i, a) in axes.iter().enumerate() {
            if axes[..i].contains(a) {
                return Err(syn::Error::new(a.span(), format!("axis {a} is declared twice")));
            }
            if RESERVED.contains(&a.to_string().as_str()) {
                return Err(syn::Error::new(
                    a.span(),
                    format!("axis name {a} is reserved by the derive"),
                ));
            }
        }
        for (alias, target) in &self.axis_aliases {
            if axes.contains(alias) {
                return Err(syn::Error::new(
                    alias.span(),
                    format!("alias {alias} shadows an axis"),
                ));
            }
            if !axes.contains(target) {
                return Err(syn::Error::new(
                    target.span(),
                    format!("alias {alias} targets unknown axis {target}"),
                ));
            }
        }
        for (i, (from, to)) in self.axis_slices.iter().enumerate() {
            if !axes.contains(from) {
                return Err(syn::Error::new(
                    from.span(),
                    format!("axis_slices names unknown axis {from}"),
                ));
            }
            if self.axis_slices[..i].iter().any(|(f, t)| f == from || t == to) {
                return Err(syn::Error::new(
                    from.span(),
                    format!("axis_slices repeats {from} = {to}"),
                ));
            }
        }
        if let Some((stat, span)) = self.stat_axis {
            if stat >= axes.len() {
                return Err(syn::Error::new(
                    span,
                    format!("stat_axis {stat} is out of range for {} axes", axes.len()),
                ));
            }
        }
        match &self.slicer {
            None if axes.len() > 1 => Err(syn::Error::new(
                name.span(),
                "a slicer = Type is required above one axis",
            )),
            Some(slicer) if axes.len() == 1 => Err(syn::Error::new(
                slicer.span(),
                "a one-axis container cannot have a slicer",
            )),
            _ => Ok(()),
        }
    }
}

/// Generates a typed labeled container from a declarative axis configuration.
///
/// The struct must be a one-field tuple struct around `NdFrame<E>`, generic over the
/// element type `E`. The `#[panel(...)]` attribute is the configuration record:
/// - `axis_orders(a, b, ...)`: axis names, outermost first
/// - `axis_slices(a = x, ...)`: slicer axis each axis maps to when a slice is taken
/// - `slicer = Type`: the one-axis-fewer type that slices are instances of
/// - `axis_aliases(alias = axis, ...)`
/// - `stat_axis = n`: default axis for reductions, `0` if omitted
/// - `constructor = path`: a `fn(&Arc<NdConfig>, InitArgs<E>) -> Result<NdFrame<E>, Error>`
///   used instead of `NdFrame::init_data`
///
/// The following are generated:
/// 1. [panelnd::NdPanel], with a config record built once per process
/// 2. one accessor per axis returning its `Index`
/// 3. `get(label)`, returning the slicer type (or the element, for one-axis types)
/// 4. `try_new(data, <one Option<Index> per axis>, copy)` and `try_new_with_dtype`
/// 5. `Deref<Target = NdFrame<E>>`, `Clone`, `Debug`, `PartialEq`, `Display`
///
/// ```ignore
/// # use panelnd::prelude::*;
/// #[derive(NdPanel)]
/// #[panel(
///     axis_orders(items, major_axis, minor_axis),
///     axis_slices(major_axis = index, minor_axis = columns),
///     slicer = DataFrame,
///     axis_aliases(major = major_axis, minor = minor_axis),
///     stat_axis = 1,
/// )]
/// pub struct Panel<E: Unit>(NdFrame<E>);
/// ```
#[proc_macro_derive(NdPanel, attributes(panel))]
pub fn nd_panel(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    match &input.data {
        Data::Struct(obj) => match &obj.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {}
            _ => {
                return Err(syn::Error::new(
                    name.span(),
                    "NdPanel expects a one-field tuple struct wrapping NdFrame<E>",
                ))
            }
        },
        _ => return Err(syn::Error::new(name.span(), "NdPanel only supports structs")),
    }
    let elem = input
        .generics
        .params
        .iter()
        .find_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .ok_or_else(|| {
            syn::Error::new(
                input.generics.span(),
                "NdPanel expects an element type parameter, e.g. struct X<E: Unit>",
            )
        })?;

    let attr = PanelAttr::parse(input)?;
    attr.validate(name)?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let klass = name.to_string();
    let ndim = attr.axis_orders.len();
    let axis_strs: Vec<String> = attr.axis_orders.iter().map(Ident::to_string).collect();

    let slices = (!attr.axis_slices.is_empty()).then(|| {
        let pairs = attr.axis_slices.iter().map(|(a, b)| {
            let (a, b) = (a.to_string(), b.to_string());
            quote!((#a, #b))
        });
        quote!(.axis_slices([#(#pairs),*]))
    });
    let aliases = (!attr.axis_aliases.is_empty()).then(|| {
        let pairs = attr.axis_aliases.iter().map(|(a, b)| {
            let (a, b) = (a.to_string(), b.to_string());
            quote!((#a, #b))
        });
        quote!(.axis_aliases([#(#pairs),*]))
    });
    let stat_axis = attr.stat_axis.map_or(0, |(s, _)| s);
    let slicer_config = attr.slicer.as_ref().map(|s| {
        quote!(.slicer(::std::sync::Arc::clone(
            <#s<#elem> as ::panelnd::NdPanel<#elem>>::config()
        )))
    });

    let init_body = match &attr.constructor {
        Some(ctor) => quote!(#ctor(Self::config(), args)),
        None => quote!(::panelnd::NdFrame::init_data(Self::config(), args)),
    };

    let accessors = attr.axis_orders.iter().enumerate().map(|(i, axis)| {
        let doc = format!("The `{axis}` axis.");
        let i = syn::Index::from(i);
        quote! {
            #[doc = #doc]
            pub fn #axis(&self) -> &::panelnd::Index {
                &self.0.axes()[#i]
            }
        }
    });

    let get = match &attr.slicer {
        Some(slicer) => quote! {
            /// The slice at `label` along the outermost axis.
            pub fn get(
                &self,
                label: impl ::core::convert::Into<::panelnd::Label>,
            ) -> ::core::result::Result<#slicer<#elem>, ::panelnd::Error> {
                let frame = self.0.get(label)?;
                <#slicer<#elem> as ::panelnd::NdPanel<#elem>>::from_frame(frame)
            }
        },
        None => quote! {
            /// The element at `label`.
            pub fn get(
                &self,
                label: impl ::core::convert::Into<::panelnd::Label>,
            ) -> ::core::result::Result<#elem, ::panelnd::Error> {
                self.0.get_value([label.into()])
            }
        },
    };

    let axis_args: Vec<Ident> = attr
        .axis_orders
        .iter()
        .map(|a| format_ident!("{}", a))
        .collect();
    let new_doc = format!(
        "Builds a {klass} from raw data and one optional index per axis ({}).",
        axis_strs.join(", ")
    );

    Ok(quote! {
        impl #impl_generics ::panelnd::NdPanel<#elem> for #name #ty_generics #where_clause {
            fn config() -> &'static ::std::sync::Arc<::panelnd::NdConfig> {
                static CONFIG: ::std::sync::OnceLock<::std::sync::Arc<::panelnd::NdConfig>> =
                    ::std::sync::OnceLock::new();
                CONFIG.get_or_init(|| {
                    let built = ::panelnd::NdConfig::builder(#klass)
                        .axis_orders([#(#axis_strs),*])
                        #slices
                        #aliases
                        #slicer_config
                        .stat_axis(#stat_axis)
                        .build();
                    match built {
                        ::core::result::Result::Ok(config) => config,
                        ::core::result::Result::Err(e) => {
                            panic!("invalid {} declaration: {}", #klass, e)
                        }
                    }
                })
            }

            fn from_frame(
                frame: ::panelnd::NdFrame<#elem>,
            ) -> ::core::result::Result<Self, ::panelnd::Error> {
                ::panelnd::check_kind(Self::config(), &frame)?;
                ::core::result::Result::Ok(Self(frame))
            }

            fn frame(&self) -> &::panelnd::NdFrame<#elem> {
                &self.0
            }

            fn into_frame(self) -> ::panelnd::NdFrame<#elem> {
                self.0
            }

            fn init(
                args: ::panelnd::InitArgs<#elem>,
            ) -> ::core::result::Result<Self, ::panelnd::Error> {
                let frame = #init_body?;
                <Self as ::panelnd::NdPanel<#elem>>::from_frame(frame)
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Number of axes.
            pub const NDIM: usize = #ndim;

            #(#accessors)*

            #get

            #[doc = #new_doc]
            ///
            /// The element type is the type of `data`. With `copy = false`, array data
            /// shares its buffer with the container.
            ///
            /// # Panics
            ///
            /// On first use, if the declaration does not form a valid configuration.
            pub fn try_new(
                data: ::core::option::Option<::panelnd::NdData<#elem>>,
                #(#axis_args: ::core::option::Option<::panelnd::Index>,)*
                copy: bool,
            ) -> ::core::result::Result<Self, ::panelnd::Error> {
                let args = ::panelnd::InitArgs {
                    data,
                    axes: ::std::vec![#(#axis_args),*],
                    copy,
                };
                <Self as ::panelnd::NdPanel<#elem>>::init(args)
            }

            /// Like `try_new`, converting `Src` data to the declared element type first.
            /// Fails on the first value that cannot be represented.
            pub fn try_new_with_dtype<Src: ::panelnd::CastTo<#elem>>(
                data: ::core::option::Option<::panelnd::NdData<Src>>,
                #(#axis_args: ::core::option::Option<::panelnd::Index>,)*
                copy: bool,
            ) -> ::core::result::Result<Self, ::panelnd::Error> {
                let args = ::panelnd::InitArgs {
                    data,
                    axes: ::std::vec![#(#axis_args),*],
                    copy,
                }
                .try_cast::<#elem>()?;
                <Self as ::panelnd::NdPanel<#elem>>::init(args)
            }
        }

        impl #impl_generics ::core::ops::Deref for #name #ty_generics #where_clause {
            type Target = ::panelnd::NdFrame<#elem>;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl #impl_generics ::core::clone::Clone for #name #ty_generics #where_clause {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl #impl_generics ::core::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#klass).field(&self.0).finish()
            }
        }

        impl #impl_generics ::core::cmp::PartialEq for #name #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl #impl_generics ::core::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::From<#name #ty_generics> for ::panelnd::NdFrame<#elem>
            #where_clause
        {
            fn from(x: #name #ty_generics) -> Self {
                x.0
            }
        }
    })
}
