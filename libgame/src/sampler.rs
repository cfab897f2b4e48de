use rand::{Rng, rngs::ThreadRng};

/// Source of randomness for seeding a board.
pub trait Sampler {
    /// Returns `amount` distinct indices in `0..population`. `amount` never exceeds `population`.
    fn sample_distinct(&mut self, population: usize, amount: usize) -> Vec<usize>;
}

/// Draws uniformly from any `rand` generator, rejecting and redrawing duplicates.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    rng: R,
}

impl<R> RandomSampler<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSampler<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::rng())
    }
}

impl<R> Sampler for RandomSampler<R>
where
    R: Rng,
{
    fn sample_distinct(&mut self, population: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(population);

        let mut taken = vec![false; population];
        let mut chosen = Vec::with_capacity(amount);

        while chosen.len() < amount {
            let index = self.rng.random_range(0..population);

            if !taken[index] {
                taken[index] = true;
                chosen.push(index);
            }
        }

        chosen
    }
}
