pub mod nas;
pub mod scenario;
pub mod scenario_parser;
pub mod properties;

#[derive(Debug, Fail)]
pub enum ParseError {
    #[fail(display = "error in regular expression: {}", _0)]
    RegexError(String),
    #[fail(display = "line {}: error converting number {:?}", _0, _1)]
    NumberError(usize, String),
    #[fail(display = "line {}: unknown {} {:?}", _0, _1, _2)]
    UnknownName(usize, &'static str, String),
    #[fail(display = "line {}: missing {}", _0, _1)]
    MissingField(usize, &'static str),
    #[fail(display = "line {}: unrecognized: {}", _0, _1)]
    Unrecognized(usize, String),
    #[fail(display = "line {}: {}", _0, _1)]
    Invalid(usize, String),
}
