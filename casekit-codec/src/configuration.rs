//! Serialized forms of [`AttributeConfiguration`].
//!
//! Both forms are tagged on `type`. Writing is an exhaustive match over the
//! logic enum; reading a kind this build does not know yields `None` instead
//! of an error, so older binaries can read schemas written by newer ones.

use casekit_model::{
    AttributeConfiguration, DocumentClassifierConfiguration, DocumentProcessingConfiguration,
};
use serde::{Deserialize, Serialize};

/// Configuration as stored inside a persisted schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttributeConfigurationJson {
    #[serde(rename = "DocumentProcessor")]
    DocumentProcessor {
        #[serde(rename = "processorId")]
        processor_id: String,
    },
    #[serde(rename = "DocumentClassifier")]
    DocumentClassifier {
        #[serde(rename = "classifierName")]
        classifier_name: String,
    },
    /// Any kind this build does not recognize.
    #[serde(other)]
    Unsupported,
}

impl From<&AttributeConfiguration> for AttributeConfigurationJson {
    fn from(configuration: &AttributeConfiguration) -> Self {
        match configuration {
            AttributeConfiguration::DocumentProcessing(c) => Self::DocumentProcessor {
                processor_id: c.processor_id.clone(),
            },
            AttributeConfiguration::DocumentClassifier(c) => Self::DocumentClassifier {
                classifier_name: c.classifier_name.clone(),
            },
        }
    }
}

impl AttributeConfigurationJson {
    /// The logic object, or `None` for unsupported kinds.
    pub fn into_configuration(self) -> Option<AttributeConfiguration> {
        match self {
            Self::DocumentProcessor { processor_id } => Some(
                DocumentProcessingConfiguration { processor_id }.into(),
            ),
            Self::DocumentClassifier { classifier_name } => Some(
                DocumentClassifierConfiguration { classifier_name }.into(),
            ),
            Self::Unsupported => None,
        }
    }
}

/// Configuration as exchanged with API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttributeConfigurationModel {
    #[serde(rename = "DocumentProcessor")]
    DocumentProcessor { processor: String },
    #[serde(rename = "DocumentClassifier")]
    DocumentClassifier { classifier: String },
    #[serde(other)]
    Unsupported,
}

impl From<&AttributeConfiguration> for AttributeConfigurationModel {
    fn from(configuration: &AttributeConfiguration) -> Self {
        match configuration {
            AttributeConfiguration::DocumentProcessing(c) => Self::DocumentProcessor {
                processor: c.processor_id.clone(),
            },
            AttributeConfiguration::DocumentClassifier(c) => Self::DocumentClassifier {
                classifier: c.classifier_name.clone(),
            },
        }
    }
}

impl AttributeConfigurationModel {
    /// The logic object, or `None` for unsupported kinds.
    pub fn into_configuration(self) -> Option<AttributeConfiguration> {
        match self {
            Self::DocumentProcessor { processor } => {
                Some(AttributeConfiguration::document_processor(processor))
            }
            Self::DocumentClassifier { classifier } => {
                Some(AttributeConfiguration::document_classifier(classifier))
            }
            Self::Unsupported => None,
        }
    }
}
