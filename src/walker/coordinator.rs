//! Walk coordination
//!
//! This module owns all per-run state and drives the walk loop:
//! fetch → parse → extract → prune → decide-next, one page at a time,
//! followed by map/reduce aggregation once the paginator terminates.
//!
//! The loop is iterative with an explicit ledger accumulator, so call
//! depth stays constant no matter how many pages are walked. There is no
//! page cap and no cycle detection; termination comes solely from the
//! paginator's next-address decision.

use serde::Serialize;
use serde_json::Value;

use crate::clean;
use crate::config::{validate, Extractor, Paginator, WalkConfig};
use crate::walker::context::{PageContext, PageResult};
use crate::walker::fetcher;
use crate::walker::parser::{self, Document};
use crate::{Result, WalkError};

/// Final output of one walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WalkOutput {
    /// Single-page mode (no paginator): that page's cleaned result.
    Page(PageResult),

    /// Paginated walk without aggregation: the raw ledger, in fetch order.
    Pages(Vec<PageResult>),

    /// Map-only aggregation: one transformed element per page, in order.
    Mapped(Vec<Value>),

    /// Reduced aggregation: the fold's final accumulator.
    Reduced(Value),
}

impl WalkOutput {
    /// Converts any variant into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            WalkOutput::Page(page) => Value::Object(page),
            WalkOutput::Pages(pages) => {
                Value::Array(pages.into_iter().map(Value::Object).collect())
            }
            WalkOutput::Mapped(values) => Value::Array(values),
            WalkOutput::Reduced(value) => value,
        }
    }

    /// The single page result, if this was a single-page walk.
    pub fn as_page(&self) -> Option<&PageResult> {
        match self {
            WalkOutput::Page(page) => Some(page),
            _ => None,
        }
    }

    /// The raw ledger, if the walk paginated without aggregation.
    pub fn as_pages(&self) -> Option<&[PageResult]> {
        match self {
            WalkOutput::Pages(pages) => Some(pages),
            _ => None,
        }
    }
}

/// What the paginator decided after a page landed in the ledger.
enum Decision {
    Continue(String),
    Finish(WalkOutput),
}

/// Runs one walk to completion. See [`crate::walker::walk`].
pub async fn run(config: WalkConfig) -> Result<WalkOutput> {
    validate(&config)?;

    let client = match &config.client {
        Some(client) => client.clone(),
        None => fetcher::build_http_client(&config.transport)?,
    };

    let mut address = config.address.clone();
    let mut previous = PageResult::new();
    let mut ledger: Vec<PageResult> = Vec::new();
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        tracing::debug!(page = page_number, %address, "fetching page");

        let body = fetcher::fetch_page(&client, &address).await?;
        let document = parser::parse_document(&body, &address)?;
        let raw = extract_fields(&config.extractors, &document, &previous, &address)?;
        let page = clean::prune_map(raw);
        tracing::debug!(page = page_number, fields = page.len(), "extracted page result");

        let Some(paginator) = &config.paginator else {
            return Ok(WalkOutput::Page(page));
        };

        ledger.push(page);

        let decision = {
            let current = &ledger[ledger.len() - 1];
            let ctx = PageContext {
                document: &document,
                current,
                previous: &previous,
                address: &address,
            };

            match (paginator.next)(&ctx).filter(|next| !next.is_empty()) {
                Some(next) => Decision::Continue(next),
                None => Decision::Finish(aggregate(paginator, &ctx, &ledger)),
            }
        };

        match decision {
            Decision::Continue(next) => {
                previous = ledger[ledger.len() - 1].clone();
                address = next;
            }
            Decision::Finish(output) => {
                tracing::debug!(pages = ledger.len(), "walk finished");
                return Ok(output);
            }
        }
    }
}

/// Runs the extractors for one page, in declaration order.
///
/// Later extractors see the fields already stored by earlier ones; the
/// previous page's cleaned result is read-only context.
fn extract_fields(
    extractors: &[(String, Extractor)],
    document: &Document,
    previous: &PageResult,
    address: &str,
) -> Result<PageResult> {
    let mut current = PageResult::new();

    for (field, extractor) in extractors {
        let value = match extractor {
            Extractor::Static(value) => value.clone(),
            Extractor::Dynamic(extract) => {
                let ctx = PageContext {
                    document,
                    current: &current,
                    previous,
                    address,
                };

                extract(&ctx).map_err(|error| WalkError::Extraction {
                    field: field.clone(),
                    address: address.to_string(),
                    error,
                })?
            }
        };

        current.insert(field.clone(), value);
    }

    Ok(current)
}

/// Applies the paginator's aggregation functions to the completed ledger.
///
/// The factories run once, with the final page's context; map transforms
/// ledger entries element-wise, reduce folds left-to-right with an
/// explicit `None` accumulator on the first call. Reduce folds the mapped
/// sequence when both are supplied.
fn aggregate(paginator: &Paginator, ctx: &PageContext<'_>, ledger: &[PageResult]) -> WalkOutput {
    let entries: Vec<Value> = ledger.iter().cloned().map(Value::Object).collect();

    let mapped: Option<Vec<Value>> = paginator.map.as_ref().map(|factory| {
        let transform = factory(ctx);
        entries.iter().map(|entry| transform(entry)).collect()
    });

    if let Some(factory) = &paginator.reduce {
        let fold = factory(ctx);
        let sequence = mapped.as_deref().unwrap_or(&entries);

        let mut accumulator: Option<Value> = None;
        for (index, element) in sequence.iter().enumerate() {
            accumulator = Some(fold(accumulator, element, index));
        }

        // The ledger has at least one entry here, so the fold ran.
        return WalkOutput::Reduced(accumulator.unwrap_or(Value::Null));
    }

    if let Some(values) = mapped {
        return WalkOutput::Mapped(values);
    }

    WalkOutput::Pages(ledger.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> PageResult {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn extractors_from(
        fields: Vec<(&str, Extractor)>,
    ) -> Vec<(String, Extractor)> {
        fields
            .into_iter()
            .map(|(name, extractor)| (name.to_string(), extractor))
            .collect()
    }

    #[test]
    fn test_extract_fields_declaration_order() {
        let document = Document::from_html("<html><body><h1>Title</h1></body></html>");
        let extractors = extractors_from(vec![
            ("base", Extractor::Static(json!(10))),
            (
                "doubled",
                Extractor::Dynamic(Box::new(|ctx| {
                    let base = ctx.current["base"].as_i64().unwrap_or(0);
                    Ok(json!(base * 2))
                })),
            ),
        ]);

        let result = extract_fields(&extractors, &document, &PageResult::new(), "http://t").unwrap();
        assert_eq!(result["base"], json!(10));
        assert_eq!(result["doubled"], json!(20));
    }

    #[test]
    fn test_extract_fields_reads_previous() {
        let document = Document::from_html("<html></html>");
        let previous = object(json!({"count": 3}));
        let extractors = extractors_from(vec![(
            "count",
            Extractor::Dynamic(Box::new(|ctx| {
                let prior = ctx
                    .previous
                    .get("count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0);
                Ok(json!(prior + 1))
            })),
        )]);

        let result = extract_fields(&extractors, &document, &previous, "http://t").unwrap();
        assert_eq!(result["count"], json!(4));
    }

    #[test]
    fn test_extract_fields_error_names_field() {
        let document = Document::from_html("<html></html>");
        let extractors = extractors_from(vec![
            ("fine", Extractor::Static(json!("ok"))),
            (
                "broken",
                Extractor::Dynamic(Box::new(|_ctx| Err(anyhow::anyhow!("nothing there")))),
            ),
        ]);

        let err = extract_fields(&extractors, &document, &PageResult::new(), "http://t")
            .unwrap_err();
        match err {
            WalkError::Extraction { field, .. } => assert_eq!(field, "broken"),
            other => panic!("expected Extraction, got {other}"),
        }
    }

    fn final_context<'a>(
        document: &'a Document,
        last: &'a PageResult,
        previous: &'a PageResult,
    ) -> PageContext<'a> {
        PageContext {
            document,
            current: last,
            previous,
            address: "http://t/last",
        }
    }

    #[test]
    fn test_aggregate_raw_ledger_without_functions() {
        let paginator = Paginator::new(|_ctx| None);
        let ledger = vec![object(json!({"n": 1})), object(json!({"n": 2}))];
        let document = Document::from_html("<html></html>");
        let previous = PageResult::new();
        let ctx = final_context(&document, &ledger[1], &previous);

        let output = aggregate(&paginator, &ctx, &ledger);
        assert_eq!(output.as_pages().map(<[PageResult]>::len), Some(2));
    }

    #[test]
    fn test_aggregate_map_only_preserves_order() {
        let paginator = Paginator::new(|_ctx| None).map(|_ctx| {
            Box::new(|entry: &Value| entry["n"].clone())
        });
        let ledger = vec![
            object(json!({"n": 1})),
            object(json!({"n": 2})),
            object(json!({"n": 3})),
        ];
        let document = Document::from_html("<html></html>");
        let previous = PageResult::new();
        let ctx = final_context(&document, &ledger[2], &previous);

        let output = aggregate(&paginator, &ctx, &ledger);
        assert_eq!(output, WalkOutput::Mapped(vec![json!(1), json!(2), json!(3)]));
    }

    #[test]
    fn test_aggregate_reduce_starts_with_no_accumulator() {
        let paginator = Paginator::new(|_ctx| None).reduce(|_ctx| {
            Box::new(|accumulator, element: &Value, _index| {
                let so_far = accumulator.and_then(|v| v.as_i64()).unwrap_or(0);
                let n = element["n"].as_i64().unwrap_or(0);
                json!(so_far + n)
            })
        });
        let ledger = vec![
            object(json!({"n": 1})),
            object(json!({"n": 2})),
            object(json!({"n": 3})),
            object(json!({"n": 4})),
        ];
        let document = Document::from_html("<html></html>");
        let previous = PageResult::new();
        let ctx = final_context(&document, &ledger[3], &previous);

        let output = aggregate(&paginator, &ctx, &ledger);
        assert_eq!(output, WalkOutput::Reduced(json!(10)));
    }

    #[test]
    fn test_aggregate_reduce_runs_over_mapped_sequence() {
        let paginator = Paginator::new(|_ctx| None)
            .map(|_ctx| Box::new(|entry: &Value| entry["word"].clone()))
            .reduce(|_ctx| {
                Box::new(|accumulator, element: &Value, _index| {
                    let mut joined = accumulator
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_default();
                    joined.push_str(element.as_str().unwrap_or(""));
                    json!(joined)
                })
            });
        let ledger = vec![object(json!({"word": "ab"})), object(json!({"word": "cd"}))];
        let document = Document::from_html("<html></html>");
        let previous = PageResult::new();
        let ctx = final_context(&document, &ledger[1], &previous);

        let output = aggregate(&paginator, &ctx, &ledger);
        assert_eq!(output, WalkOutput::Reduced(json!("abcd")));
    }

    #[test]
    fn test_into_value_shapes() {
        let page = object(json!({"a": 1}));
        assert_eq!(WalkOutput::Page(page.clone()).into_value(), json!({"a": 1}));
        assert_eq!(
            WalkOutput::Pages(vec![page]).into_value(),
            json!([{"a": 1}])
        );
        assert_eq!(
            WalkOutput::Mapped(vec![json!("x")]).into_value(),
            json!(["x"])
        );
        assert_eq!(WalkOutput::Reduced(json!(7)).into_value(), json!(7));
    }
}
