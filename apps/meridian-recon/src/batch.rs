//! # Batch Input
//!
//! The dashboard exports either one draft object or an array of them. The
//! report mirrors that shape.

use meridian_core::{CoreError, OrderDraft};
use serde_json::Value;

/// Parsed input, remembering whether it was a single draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Single(OrderDraft),
    Many(Vec<OrderDraft>),
}

impl Batch {
    /// Parses one draft or an array of drafts.
    ///
    /// ## Errors
    /// [`CoreError::InvalidArgument`] when the input is not JSON or an
    /// element is not an order draft. Array errors name the element index.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| CoreError::InvalidArgument(format!("input is not valid JSON: {}", e)))?;

        match value {
            Value::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| {
                    serde_json::from_value(element).map_err(|e| {
                        CoreError::InvalidArgument(format!("draft #{}: {}", index + 1, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Batch::Many),
            single => serde_json::from_value(single)
                .map(Batch::Single)
                .map_err(|e| CoreError::InvalidArgument(e.to_string())),
        }
    }

    /// The drafts in input order.
    pub fn drafts(&self) -> &[OrderDraft] {
        match self {
            Batch::Single(draft) => std::slice::from_ref(draft),
            Batch::Many(drafts) => drafts,
        }
    }

    pub fn len(&self) -> usize {
        self.drafts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"{ "items": [], "paymentMethod": "cash" }"#;

    #[test]
    fn test_single_draft() {
        let batch = Batch::parse(DRAFT).unwrap();
        assert!(matches!(batch, Batch::Single(_)));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_array_of_drafts() {
        let batch = Batch::parse(&format!("[{DRAFT}, {DRAFT}]")).unwrap();
        assert!(matches!(batch, Batch::Many(_)));
        assert_eq!(batch.drafts().len(), 2);

        assert!(Batch::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_bad_element_names_index() {
        let err = Batch::parse(&format!("[{DRAFT}, {{ \"items\": 3 }}]")).unwrap_err();
        match err {
            CoreError::InvalidArgument(message) => assert!(message.starts_with("draft #2:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_drafts() {
        for input in ["", "null", "42", "\"draft\"", "{ invalid"] {
            assert!(
                matches!(Batch::parse(input), Err(CoreError::InvalidArgument(_))),
                "expected InvalidArgument for {input:?}"
            );
        }
    }
}
