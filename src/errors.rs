use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown JSON Error")]
    JsonUnknownError,
    #[error("Missing JSON content-type header")]
    MissingContentType,
    #[error("JSON Syntax error: {0}")]
    JsonSyntaxError(String),
    #[error("Invalid JSON data: {0}")]
    JsonDataError(String),
    #[error("Pairing method `{0}` is not valid, possible values are: id-order and swiss")]
    InvalidPairingMethod(String),
    #[error("Player id `{0}` is registered more than once")]
    DuplicatePlayerId(String),
    #[error("Player `{player}` cannot be paired against themselves at table {table}")]
    SelfPairing { table: u32, player: String },
    #[error("Table {0} is a bye, byes cannot be scored")]
    ByeCannotBeScored(u32),
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn code(&self) -> String {
        match self {
            AppError::JsonUnknownError => String::from("JsonUnknownError"),
            AppError::MissingContentType => String::from("MissingContentType"),
            AppError::JsonSyntaxError(_) => String::from("JsonSyntaxError"),
            AppError::JsonDataError(_) => String::from("JsonDataError"),
            AppError::InvalidPairingMethod(_) => String::from("InvalidPairingMethod"),
            AppError::DuplicatePlayerId(_) => String::from("DuplicatePlayerId"),
            AppError::SelfPairing {
                table: _,
                player: _,
            } => String::from("SelfPairing"),
            AppError::ByeCannotBeScored(_) => String::from("ByeCannotBeScored"),
            AppError::InvalidQuery(_) => String::from("InvalidQuery"),
            AppError::InvalidConfig(_) => String::from("InvalidConfig"),
            AppError::Io(_) => String::from("IoError"),
        }
    }
}
