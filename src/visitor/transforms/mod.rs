pub mod element_counter;
pub mod member_outline;

pub use element_counter::{ElementCounter, ElementCounts};
pub use member_outline::MemberOutline;
