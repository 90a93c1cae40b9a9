use rfscan_common::SampleIndex;
use std::fmt::{Debug, Display};

/// This trait abstracts any type used as a time variable.
pub trait Temporal: Default + Copy + Debug + Display + PartialEq {}

impl Temporal for SampleIndex {}

/// An abstraction of the points flowing through a [Window](super::Window):
/// a time and the value measured at it.
pub trait TracePoint: Clone {
    type Time: Temporal;
    type Value: Copy;

    fn get_time(&self) -> Self::Time;

    fn get_value(&self) -> &Self::Value;

    fn clone_value(&self) -> Self::Value {
        *self.get_value()
    }
}

/// The first element is the time and the second the value.
impl<X, Y> TracePoint for (X, Y)
where
    X: Temporal,
    Y: Copy,
{
    type Time = X;
    type Value = Y;

    fn get_time(&self) -> Self::Time {
        self.0
    }

    fn get_value(&self) -> &Self::Value {
        &self.1
    }
}
