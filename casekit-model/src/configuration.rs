//! Typed metadata attached to individual schema attributes.
//!
//! Each kind is its own payload struct wrapped by one variant of
//! [`AttributeConfiguration`]. Every conversion to another representation is
//! an exhaustive `match`, so adding a kind is a compile-checked change.

/// Names an automated processor to run against files uploaded to the
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentProcessingConfiguration {
    pub processor_id: String,
}

/// Names the classifier used to label files uploaded to the attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentClassifierConfiguration {
    pub classifier_name: String,
}

/// Per-attribute configuration, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeConfiguration {
    DocumentProcessing(DocumentProcessingConfiguration),
    DocumentClassifier(DocumentClassifierConfiguration),
}

impl AttributeConfiguration {
    /// Discriminator used by every serialized representation.
    pub const DOCUMENT_PROCESSOR: &'static str = "DocumentProcessor";
    pub const DOCUMENT_CLASSIFIER: &'static str = "DocumentClassifier";

    pub fn document_processor(processor_id: impl Into<String>) -> Self {
        Self::DocumentProcessing(DocumentProcessingConfiguration {
            processor_id: processor_id.into(),
        })
    }

    pub fn document_classifier(classifier_name: impl Into<String>) -> Self {
        Self::DocumentClassifier(DocumentClassifierConfiguration {
            classifier_name: classifier_name.into(),
        })
    }

    /// The stable discriminator of this configuration's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DocumentProcessing(_) => Self::DOCUMENT_PROCESSOR,
            Self::DocumentClassifier(_) => Self::DOCUMENT_CLASSIFIER,
        }
    }

    pub fn as_document_processing(&self) -> Option<&DocumentProcessingConfiguration> {
        match self {
            Self::DocumentProcessing(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_document_classifier(&self) -> Option<&DocumentClassifierConfiguration> {
        match self {
            Self::DocumentClassifier(c) => Some(c),
            _ => None,
        }
    }
}

impl From<DocumentProcessingConfiguration> for AttributeConfiguration {
    fn from(c: DocumentProcessingConfiguration) -> Self {
        Self::DocumentProcessing(c)
    }
}

impl From<DocumentClassifierConfiguration> for AttributeConfiguration {
    fn from(c: DocumentClassifierConfiguration) -> Self {
        Self::DocumentClassifier(c)
    }
}
