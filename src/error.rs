use crate::{
    batch::BatchError, export::ExportError, loader::LoaderError, phasor::PhasorError,
    plot::PlotError, schema::SchemaError, table::TableError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `table` module")]
    Table(#[from] TableError),
    #[error("Error in the `schema` module")]
    Schema(#[from] SchemaError),
    #[error("Error in the `loader` module")]
    Loader(#[from] LoaderError),
    #[error("Error in the `plot` module")]
    Plot(#[from] PlotError),
    #[error("Error in the `phasor` module")]
    Phasor(#[from] PhasorError),
    #[error("Error in the `export` module")]
    Export(#[from] ExportError),
    #[error("Error in the `batch` module")]
    Batch(#[from] BatchError),
    #[error("failed to write the results table")]
    Csv(#[from] csv::Error),
}
pub type Result<T> = std::result::Result<T, Error>;
