use std::{error, fmt, io, path::PathBuf};

#[derive(Debug, derive_more::From)]
pub enum Error {
    #[from(ignore)]
    BadConfig(String),
    RonDeserialize {
        error: ron::de::Error,
        path: Option<PathBuf>,
    },
    Io(io::Error),
}

impl Error {
    pub fn from_ron_de_error(error: ron::de::Error, path: PathBuf) -> Self {
        Error::RonDeserialize {
            error,
            path: Some(path),
        }
    }

    pub fn from_ron_de_error_in_memory(error: ron::de::Error) -> Self {
        Error::RonDeserialize { error, path: None }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadConfig(ref msg) => write!(f, "Bad config: {}", msg),
            Error::RonDeserialize { error, path } => {
                let s = path
                    .as_ref()
                    .and_then(|path| path.to_str())
                    .unwrap_or("<no path>");
                write!(f, "Can't deserialize '{}': {}", s, error)
            }
            Error::Io(ref e) => write!(f, "IO Error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::BadConfig(_) => None,
            Error::RonDeserialize { error, .. } => Some(error),
            Error::Io(ref e) => Some(e),
        }
    }
}
