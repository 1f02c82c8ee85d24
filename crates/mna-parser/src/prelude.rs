pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

pub use crate::elements::{Element, Identifiable};
pub use crate::utils::{alphanumeric_or_underscore1, parse_value, value_parser};
pub use std::collections::HashMap;
pub use std::str::FromStr;

pub use nom::IResult;
pub use nom::Parser;
pub use nom::bytes::complete::tag_no_case;
pub use nom::character::complete::space1;
pub use nom::combinator::all_consuming;
pub use nom::sequence::preceded;
