use decoder_api::StageError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Open(StageError),

    #[error("failed to read row {index}: {source}")]
    ReadRow { index: usize, source: StageError },

    #[error("{0}")]
    Schema(StageError),

    #[error("output: {0}")]
    Output(#[from] std::io::Error),
}
