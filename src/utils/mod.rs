pub mod scaler;
pub mod sort;
