use std::path::PathBuf;

/// Errors raised by dictionary construction and segmentation.
#[derive(thiserror::Error, Debug)]
pub enum SegmenterError {
    #[error("dictionary not found at {path}")]
    DictionaryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("frequency file at {path} is not valid JSON")]
    FrequencyFileMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "could not segment text: stuck at position {reached} of {input_len} \
         (next characters: {remainder:?})"
    )]
    SegmentationFailed {
        reached: usize,
        remainder: String,
        input_len: usize,
    },
}
