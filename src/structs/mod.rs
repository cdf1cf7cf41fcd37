pub mod sizes;
pub mod update;
