//! Request guards and cross-cutting request processing.

pub mod auth;
pub mod session;
pub mod timing;

#[cfg(test)]
mod test;
