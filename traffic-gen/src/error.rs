use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Database error")]
    Database(#[from] postgres::Error),
    #[error("No rows available in the `{0}` table")]
    EmptyTable(&'static str),
}
