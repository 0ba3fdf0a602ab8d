use rand::Rng;

use crate::ray::Ray;

/// Number of rays in a generated field.
pub const RAY_COUNT: usize = 15;

/// The set of rays currently drawn by the pillar.
///
/// Regeneration discards every ray and draws a fresh set; nothing from the
/// previous generation survives. Iteration order is insertion order and stays
/// stable until the next regeneration.
#[derive(Debug, Clone, Default)]
pub struct RayField {
    rays: Vec<Ray>,
    generation: u64,
}

impl RayField {
    /// A field with no rays, before the first mount.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A freshly generated field.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut field = Self::empty();
        field.regenerate(rng);
        field
    }

    /// Replace every ray with [`RAY_COUNT`] new ones.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rays = (0..RAY_COUNT).map(|_| Ray::random(rng)).collect();
        self.generation += 1;
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ray> {
        self.rays.iter()
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// How many times this field has been (re)generated.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<'a> IntoIterator for &'a RayField {
    type Item = &'a Ray;
    type IntoIter = std::slice::Iter<'a, Ray>;

    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}
