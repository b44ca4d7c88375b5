//! Copy-then-mutate helper.

/// Turns any in-place operation into one that returns a modified copy.
///
/// ```
/// use amir_dev_studio::cv::{Image, Trim};
/// use amir_dev_studio::mutate::Mutate;
///
/// let image = Image::create_blank(100, 100, 3).unwrap();
/// let trimmed = image.mutated(|copy| copy.trim(Trim::Uniform(5))).unwrap();
/// assert_eq!((image.width(), trimmed.width()), (100, 90));
/// ```
pub trait Mutate: Clone {
    /// Clones `self`, applies `f` to the clone and returns it.
    ///
    /// On failure the error is returned and the copy dropped.
    fn mutated<F, E>(&self, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let mut copy = self.clone();
        f(&mut copy)?;
        Ok(copy)
    }
}

impl<T: Clone> Mutate for T {}
