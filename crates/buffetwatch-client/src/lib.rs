pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::BuffetClient;
pub use error::ClientError;
pub use normalize::{records_for_slot, FAILED_TO_FETCH, NO_BUFFET_DATA};
pub use types::{BuffetEntry, BuffetPriceRequest, BuffetPriceResponse};
