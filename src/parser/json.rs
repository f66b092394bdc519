//! SPARQL Query Results JSON parser

use super::{ParseError, ParseResult, ResultParser};
use crate::rdf::{BlankNode, Literal, Node, Uri};
use crate::results::{
    BindingsResultSet, BooleanResultSet, QueryContext, ResultHeader, ResultSet, Row, Table,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Parser for `application/sparql-results+json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResultParser;

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    head: JsonHead,
    results: Option<JsonResults>,
    boolean: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct JsonHead {
    #[serde(default)]
    vars: Vec<String>,
    #[serde(default)]
    link: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JsonResults {
    bindings: Vec<HashMap<String, JsonTerm>>,
}

#[derive(Debug, Deserialize)]
struct JsonTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(rename = "xml:lang")]
    language: Option<String>,
    datatype: Option<String>,
}

impl JsonTerm {
    fn into_node(self) -> ParseResult<Node> {
        match self.kind.as_str() {
            "uri" => Uri::parse(&self.value)
                .map(Node::from)
                .map_err(|_| ParseError::Grammar(format!("malformed URI '{}'", self.value))),
            "bnode" => Ok(BlankNode::new(self.value)?.into()),
            "literal" | "typed-literal" => {
                let datatype = match self.datatype {
                    Some(dt) => Some(Uri::parse(&dt).map_err(|_| {
                        ParseError::Grammar(format!("malformed literal datatype '{}'", dt))
                    })?),
                    None => None,
                };
                Ok(Literal::from_parts(self.value, self.language, datatype)?.into())
            }
            other => Err(ParseError::Grammar(format!("unknown term type '{}'", other))),
        }
    }
}

impl ResultParser for JsonResultParser {
    fn parse_bytes(&self, input: &[u8], context: Option<QueryContext>) -> ParseResult<ResultSet> {
        let doc: JsonDocument = serde_json::from_slice(input)?;

        let links = doc
            .head
            .link
            .iter()
            .map(|href| {
                Uri::parse(href)
                    .map_err(|_| ParseError::Grammar(format!("malformed link href '{}'", href)))
            })
            .collect::<ParseResult<Vec<_>>>()?;

        match (doc.results, doc.boolean) {
            (Some(_), Some(_)) => Err(ParseError::Grammar(
                "document carries both 'results' and 'boolean'".to_string(),
            )),
            (None, None) => Err(ParseError::Grammar(
                "document contained no result".to_string(),
            )),
            (None, Some(value)) => Ok(BooleanResultSet::new(value, links, context)?.into()),
            (Some(results), None) => {
                let header = Arc::new(ResultHeader::new(doc.head.vars, links)?);
                let mut rows: Vec<Row> = Vec::with_capacity(results.bindings.len());
                for solution in results.bindings {
                    let mut row = vec![None; header.variable_count()];
                    for (var, term) in solution {
                        let column = header.position(&var).ok_or_else(|| {
                            ParseError::Grammar(format!(
                                "binding variable '{}' not present in header",
                                var
                            ))
                        })?;
                        row[column] = Some(term.into_node()?);
                    }
                    rows.push(row.into_boxed_slice());
                }
                debug!(rows = rows.len(), columns = header.variable_count(), "parsed sparql json bindings");
                Ok(BindingsResultSet::new(Table::new(header, rows), context).into())
            }
        }
    }
}
