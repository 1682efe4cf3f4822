//! Client for the TCP control protocol of Luxtronik heat pump controllers.
//!
//! A [`Session`](session::Session) exchanges whole register banks with the controller. The raw
//! words land in a [`RegisterMap`](register_map::RegisterMap), whose [`Register`](registers::Register)s
//! decode them into typed [`Value`](registers::Value)s according to the [`catalogue`].

pub mod catalogue;
pub mod codes;
pub mod commands;
pub mod output;
pub mod protocol;
pub mod register_map;
pub mod registers;
pub mod session;
pub mod wire;
