pub mod users;
pub mod villa_numbers;
pub mod villas;
