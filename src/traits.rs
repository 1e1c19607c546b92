/// Boolean operations on 2D regions
pub trait BooleanOps: Sized + Clone {
    type Output;

    fn union(&self, other: &Self) -> Self::Output;
    fn difference(&self, other: &Self) -> Self::Output;
    fn intersection(&self, other: &Self) -> Self::Output;
    fn xor(&self, other: &Self) -> Self::Output;
}
