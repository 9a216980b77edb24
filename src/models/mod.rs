//! 数据模型模块

mod alert;
mod common;
mod device_token;
mod push;

pub use alert::*;
pub use common::*;
pub use device_token::*;
pub use push::*;
