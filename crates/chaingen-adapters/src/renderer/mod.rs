//! Template renderer adapters.

mod echo;
mod jinja;

pub use echo::EchoRenderer;
pub use jinja::MiniJinjaRenderer;
