use awc::error::SendRequestError as ActixError;
use lucidity::Error as LucidityError;
use num256::Uint256;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::num::ParseIntError;
use tokio::time::error::Elapsed;

#[derive(Debug)]
pub enum Web3Error {
    BadResponse(String),
    FailedToSend(ActixError),
    JsonRpcError {
        code: i64,
        message: String,
        data: String,
    },
    InsufficientNrg {
        balance: Uint256,
        base_nrg: Uint256,
        nrg_required: Uint256,
    },
    BadInput(String),
    LucidityError(LucidityError),
    ContractCallError(String),
    TransactionTimeout,
    SyncingNode(String),
}

impl From<ParseIntError> for Web3Error {
    fn from(error: ParseIntError) -> Self {
        Web3Error::BadResponse(format!("{error}"))
    }
}

impl From<LucidityError> for Web3Error {
    fn from(error: LucidityError) -> Self {
        Web3Error::LucidityError(error)
    }
}

impl From<Elapsed> for Web3Error {
    fn from(_error: Elapsed) -> Self {
        Web3Error::TransactionTimeout
    }
}

impl Display for Web3Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Web3Error::BadResponse(val) => write!(f, "Web3 bad response {val}"),
            Web3Error::BadInput(val) => write!(f, "Web3 bad input {val}"),
            Web3Error::FailedToSend(val) => write!(f, "Web3 Failed to send {val}"),
            Web3Error::LucidityError(val) => write!(f, "LucidityError {val}"),
            Web3Error::TransactionTimeout => write!(f, "Transaction did not enter chain in time"),
            Web3Error::InsufficientNrg {
                balance,
                base_nrg,
                nrg_required,
            } => {
                write!(f, "Transaction requires {nrg_required} nrg at a base of {base_nrg} but the balance is only {balance}. Transaction impossible")
            }
            Web3Error::ContractCallError(val) => {
                write!(f, "Error performing Aion contract call {val}")
            }
            Web3Error::JsonRpcError {
                code,
                message,
                data,
            } => write!(
                f,
                "Web3 Response error code {code} message {message} data {data:?}"
            ),
            Web3Error::SyncingNode(val) => {
                write!(f, "Web3 Node is syncing {val}")
            }
        }
    }
}

impl Error for Web3Error {}
