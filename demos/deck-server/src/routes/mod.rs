pub mod cards;
pub mod deck;
pub mod meta;
pub mod session;
pub mod store;
