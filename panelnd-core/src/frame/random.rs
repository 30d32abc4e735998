use super::NdFrame;
use crate::config::NdConfig;
use crate::dtypes::Unit;
use crate::error::Error;
use crate::index::Index;
use crate::storage::StridedArray;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use rand_distr::StandardNormal;
use std::sync::Arc;

impl<E: Unit> NdFrame<E> {
    /// Fills a frame over `axes` with samples from a standard normal distribution.
    pub fn sample_normal<R: Rng>(
        config: &Arc<NdConfig>,
        axes: Vec<Index>,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        StandardNormal: Distribution<E>,
    {
        Self::sample(config, axes, rng, StandardNormal)
    }

    /// Fills a frame over `axes` with samples from [Standard]: `[0, 1)` for floats,
    /// the whole range for integers.
    pub fn sample_uniform<R: Rng>(
        config: &Arc<NdConfig>,
        axes: Vec<Index>,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        Standard: Distribution<E>,
    {
        Self::sample(config, axes, rng, Standard)
    }

    /// Fills a frame over `axes` with samples from a given distribution.
    pub fn sample<R: Rng, D: Distribution<E>>(
        config: &Arc<NdConfig>,
        axes: Vec<Index>,
        rng: &mut R,
        distr: D,
    ) -> Result<Self, Error> {
        let shape: Vec<usize> = axes.iter().map(Index::len).collect();
        let n = crate::shapes::num_elements(&shape);
        let data: Vec<E> = distr.sample_iter(rng).take(n).collect();
        Self::from_parts(config.clone(), axes, StridedArray::from_vec(data, shape)?)
    }
}
