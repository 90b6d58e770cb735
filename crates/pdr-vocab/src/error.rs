use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    /// A token exists in both the degree and credential vocabularies. The
    /// parser cannot classify such a token, so construction aborts before
    /// any data is processed.
    #[error("token '{token}' exists in both the degree and credential vocabularies")]
    Collision { token: String },

    /// The same acronym was defined twice within one vocabulary.
    #[error("duplicate acronym '{acronym}' in the {vocabulary} vocabulary")]
    DuplicateAcronym {
        vocabulary: &'static str,
        acronym: String,
    },
}

pub type Result<T> = std::result::Result<T, VocabError>;
