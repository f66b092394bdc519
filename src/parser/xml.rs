//! SPARQL Query Results XML parser
//!
//! The document grammar is enforced by [`XmlResultsHandler`], a state
//! machine fed with element-open, element-close and text events. The
//! quick-xml reader only tokenizes; every ordering rule lives in the handler.
//!
//! ```text
//! STOPPED -> STARTED -> HEAD_SECT -> AFTER_HEAD -> BOOLEAN | RESULTS
//! RESULTS -> (RESULT -> BINDING -> URI | BNODE | LITERAL -> BINDING -> RESULT)*
//! RESULTS closes -> STARTED -> STOPPED
//! ```

use super::{ParseError, ParseResult, ResultParser};
use crate::rdf::{BlankNode, Literal, Node, Uri};
use crate::results::{
    BindingsResultSet, BooleanResultSet, QueryContext, ResultHeader, ResultSet, Row, Table,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Parser for `application/sparql-results+xml`
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlResultParser;

impl ResultParser for XmlResultParser {
    fn parse_bytes(&self, input: &[u8], context: Option<QueryContext>) -> ParseResult<ResultSet> {
        let mut reader = Reader::from_reader(input);
        reader.expand_empty_elements(true);

        let mut handler = XmlResultsHandler::new(context);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let name = utf8(e.local_name().as_ref())?.to_string();
                    let mut attributes = Vec::new();
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        let key = utf8(attr.key.as_ref())?.to_string();
                        let value = attr.unescape_value()?.into_owned();
                        attributes.push((key, value));
                    }
                    handler.open(&name, &attributes)?;
                }
                Event::End(e) => {
                    handler.close(utf8(e.local_name().as_ref())?)?;
                }
                Event::Text(t) => {
                    handler.characters(&t.unescape()?)?;
                }
                Event::CData(c) => {
                    handler.characters(utf8(&c)?)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        handler.finish()
    }
}

fn utf8(bytes: &[u8]) -> ParseResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ParseError::Grammar(format!("invalid UTF-8: {}", e)))
}

fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stopped,
    Started,
    HeadSect,
    VariableDecl,
    LinkDecl,
    AfterHead,
    ReadingBoolean,
    ResultsSect,
    ResultSect,
    ResultBinding,
    UriBinding,
    BnodeBinding,
    LiteralBinding,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Stopped => "STOPPED",
            State::Started => "STARTED",
            State::HeadSect => "HEAD_SECT",
            State::VariableDecl => "VARIABLE",
            State::LinkDecl => "LINK",
            State::AfterHead => "AFTER_HEAD",
            State::ReadingBoolean => "READING_BOOLEAN",
            State::ResultsSect => "RESULTS_SECT",
            State::ResultSect => "RESULT_SECT",
            State::ResultBinding => "RESULT_BINDING",
            State::UriBinding => "URI_BINDING",
            State::BnodeBinding => "BNODE_BINDING",
            State::LiteralBinding => "LITERAL_BINDING",
        };
        f.write_str(name)
    }
}

/// Grammar state machine for SPARQL results XML
///
/// Element names are local names; attribute keys are qualified
/// (`xml:lang`). The first grammar violation returns an error and the
/// handler must be discarded.
#[derive(Debug)]
pub struct XmlResultsHandler {
    state: State,
    seen_root: bool,
    context: Option<QueryContext>,

    variables: Vec<String>,
    links: Vec<Uri>,
    header: Option<Arc<ResultHeader>>,

    rows: Vec<Row>,
    row: Vec<Option<Node>>,
    column: usize,
    bound: bool,

    text: String,
    language: Option<String>,
    datatype: Option<Uri>,

    result: Option<ResultSet>,
}

impl XmlResultsHandler {
    pub fn new(context: Option<QueryContext>) -> Self {
        Self {
            state: State::Stopped,
            seen_root: false,
            context,
            variables: Vec::new(),
            links: Vec::new(),
            header: None,
            rows: Vec::new(),
            row: Vec::new(),
            column: 0,
            bound: false,
            text: String::new(),
            language: None,
            datatype: None,
            result: None,
        }
    }

    fn error(&self, message: impl fmt::Display) -> ParseError {
        ParseError::Grammar(format!("{} (state {})", message, self.state))
    }

    fn expect(&self, expected: State, element: &str) -> ParseResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.error(format_args!(
                "<{}> expected in {}, found in {}",
                element, expected, self.state
            )))
        }
    }

    fn required<'a>(&self, attributes: &'a [(String, String)], element: &str, key: &str) -> ParseResult<&'a str> {
        attribute(attributes, key)
            .ok_or_else(|| self.error(format_args!("<{}> requires a '{}' attribute", element, key)))
    }

    /// Element-open event
    pub fn open(&mut self, name: &str, attributes: &[(String, String)]) -> ParseResult<()> {
        match name {
            "sparql" => {
                if self.seen_root || self.state != State::Stopped {
                    return Err(self.error("document cannot contain another <sparql> root"));
                }
                self.seen_root = true;
                self.state = State::Started;
            }
            "head" => {
                self.expect(State::Started, name)?;
                if self.header.is_some() {
                    return Err(self.error("document cannot contain a second <head>"));
                }
                if self.result.is_some() {
                    return Err(self.error("<head> cannot follow a result"));
                }
                self.state = State::HeadSect;
            }
            "variable" => {
                self.expect(State::HeadSect, name)?;
                if !self.links.is_empty() {
                    return Err(self.error("<variable> must be declared before any <link>"));
                }
                let var = self.required(attributes, name, "name")?;
                if self.variables.iter().any(|v| v == var) {
                    return Err(self.error(format_args!("variable '{}' declared twice", var)));
                }
                self.variables.push(var.to_string());
                self.state = State::VariableDecl;
            }
            "link" => {
                self.expect(State::HeadSect, name)?;
                let href = self.required(attributes, name, "href")?;
                let uri = Uri::parse(href)
                    .map_err(|_| self.error(format_args!("malformed link href '{}'", href)))?;
                self.links.push(uri);
                self.state = State::LinkDecl;
            }
            "boolean" => {
                let at_start =
                    self.state == State::Started && self.header.is_none() && self.result.is_none();
                if self.state != State::AfterHead && !at_start {
                    return Err(self.error("<boolean> expected after <head>"));
                }
                self.text.clear();
                self.state = State::ReadingBoolean;
            }
            "results" => {
                self.expect(State::AfterHead, name)?;
                self.state = State::ResultsSect;
            }
            "result" => {
                self.expect(State::ResultsSect, name)?;
                let width = self.header.as_ref().map_or(0, |h| h.variable_count());
                self.row = vec![None; width];
                self.state = State::ResultSect;
            }
            "binding" => {
                self.expect(State::ResultSect, name)?;
                let var = self.required(attributes, name, "name")?;
                let column = self
                    .header
                    .as_ref()
                    .and_then(|h| h.position(var))
                    .ok_or_else(|| {
                        self.error(format_args!("binding variable '{}' not present in header", var))
                    })?;
                if self.row.get(column).map_or(false, Option::is_some) {
                    return Err(self.error(format_args!("variable '{}' bound twice in one result", var)));
                }
                self.column = column;
                self.bound = false;
                self.state = State::ResultBinding;
            }
            "uri" | "bnode" | "literal" => {
                self.expect(State::ResultBinding, name)?;
                if self.bound {
                    return Err(self.error("<binding> holds more than one value"));
                }
                self.text.clear();
                self.state = match name {
                    "uri" => State::UriBinding,
                    "bnode" => State::BnodeBinding,
                    _ => {
                        self.language = attribute(attributes, "xml:lang").map(str::to_string);
                        self.datatype = match attribute(attributes, "datatype") {
                            Some(dt) => Some(Uri::parse(dt).map_err(|_| {
                                self.error(format_args!("malformed literal datatype '{}'", dt))
                            })?),
                            None => None,
                        };
                        if self.language.is_some() && self.datatype.is_some() {
                            return Err(self.error("literal cannot carry both xml:lang and datatype"));
                        }
                        State::LiteralBinding
                    }
                };
            }
            other => return Err(self.error(format_args!("unknown element <{}>", other))),
        }
        Ok(())
    }

    /// Element-close event
    pub fn close(&mut self, name: &str) -> ParseResult<()> {
        match name {
            "sparql" => {
                if self.state != State::Started {
                    return Err(self.error("unterminated section at </sparql>"));
                }
                self.state = State::Stopped;
            }
            "head" => {
                self.expect(State::HeadSect, name)?;
                let header = ResultHeader::new(
                    std::mem::take(&mut self.variables),
                    std::mem::take(&mut self.links),
                )?;
                self.header = Some(Arc::new(header));
                self.state = State::AfterHead;
            }
            "variable" => {
                self.expect(State::VariableDecl, name)?;
                self.state = State::HeadSect;
            }
            "link" => {
                self.expect(State::LinkDecl, name)?;
                self.state = State::HeadSect;
            }
            "boolean" => {
                self.expect(State::ReadingBoolean, name)?;
                let value = match self.text.trim() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(self.error(format_args!(
                            "boolean must be 'true' or 'false', found '{}'",
                            other
                        )))
                    }
                };
                let links = self
                    .header
                    .as_ref()
                    .map(|h| h.links().to_vec())
                    .unwrap_or_default();
                let rs = BooleanResultSet::new(value, links, self.context.take())?;
                self.result = Some(rs.into());
                self.state = State::Started;
            }
            "results" => {
                self.expect(State::ResultsSect, name)?;
                let header = self.header.clone().unwrap_or_else(|| Arc::new(ResultHeader::empty()));
                let rows = std::mem::take(&mut self.rows);
                debug!(rows = rows.len(), columns = header.variable_count(), "parsed sparql xml bindings");
                let rs = BindingsResultSet::new(Table::new(header, rows), self.context.take());
                self.result = Some(rs.into());
                self.state = State::Started;
            }
            "result" => {
                self.expect(State::ResultSect, name)?;
                let row = std::mem::take(&mut self.row);
                self.rows.push(row.into_boxed_slice());
                self.state = State::ResultsSect;
            }
            "binding" => {
                // an empty binding leaves its cell unbound
                self.expect(State::ResultBinding, name)?;
                self.state = State::ResultSect;
            }
            "uri" => {
                self.expect(State::UriBinding, name)?;
                let text = self.text.trim();
                let uri = Uri::parse(text)
                    .map_err(|_| self.error(format_args!("malformed URI '{}'", text)))?;
                self.bind(uri.into());
            }
            "bnode" => {
                self.expect(State::BnodeBinding, name)?;
                let node = BlankNode::new(self.text.trim()).map_err(|e| self.error(e))?;
                self.bind(node.into());
            }
            "literal" => {
                self.expect(State::LiteralBinding, name)?;
                let literal = Literal::from_parts(
                    self.text.trim(),
                    self.language.take(),
                    self.datatype.take(),
                )
                .map_err(|e| self.error(e))?;
                self.bind(literal.into());
            }
            other => return Err(self.error(format_args!("unknown element </{}>", other))),
        }
        Ok(())
    }

    fn bind(&mut self, node: Node) {
        if let Some(cell) = self.row.get_mut(self.column) {
            *cell = Some(node);
        }
        self.bound = true;
        self.text.clear();
        self.state = State::ResultBinding;
    }

    /// Text event
    pub fn characters(&mut self, text: &str) -> ParseResult<()> {
        match self.state {
            State::ReadingBoolean
            | State::UriBinding
            | State::BnodeBinding
            | State::LiteralBinding => {
                self.text.push_str(text);
                Ok(())
            }
            _ if text.trim().is_empty() => Ok(()),
            _ => Err(self.error(format_args!("unexpected text '{}'", text.trim()))),
        }
    }

    /// End of input
    pub fn finish(self) -> ParseResult<ResultSet> {
        if self.state != State::Stopped {
            return Err(self.error("unexpected end of document"));
        }
        self.result
            .ok_or_else(|| ParseError::Grammar("document contained no result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::xsd;
    use crate::results::{ResultCursor, SparqlType};

    fn parse(doc: &str) -> ParseResult<ResultSet> {
        XmlResultParser.parse_bytes(doc.as_bytes(), None)
    }

    fn grammar_error(doc: &str) -> String {
        match parse(doc) {
            Err(ParseError::Grammar(msg)) => msg,
            other => panic!("expected grammar error, got {:?}", other.map(|rs| rs.sparql_type())),
        }
    }

    const BINDINGS: &str = r#"<?xml version="1.0"?>
<sparql xmlns="http://www.w3.org/2005/sparql-results#">
  <head>
    <variable name="x"/>
    <variable name="name"/>
    <variable name="age"/>
  </head>
  <results>
    <result>
      <binding name="x"><bnode>r1</bnode></binding>
      <binding name="name"><literal xml:lang="en">Alice</literal></binding>
      <binding name="age"><literal datatype="http://www.w3.org/2001/XMLSchema#integer">30</literal></binding>
    </result>
    <result>
      <binding name="x"><uri>http://example.org/bob</uri></binding>
    </result>
  </results>
</sparql>"#;

    #[test]
    fn test_bindings_document() {
        let mut rs = parse(BINDINGS).unwrap();
        assert_eq!(rs.sparql_type(), SparqlType::Bindings);
        assert_eq!(rs.meta_data().column_count(), 3);

        assert!(rs.next().unwrap());
        assert!(rs.get_object(1).unwrap().unwrap().is_blank_node());
        let name = rs.get_object_by_name("name").unwrap().unwrap();
        assert_eq!(name.as_literal().unwrap().language(), Some("en"));
        let age = rs.get_object(3).unwrap().unwrap().as_literal().unwrap();
        assert_eq!(age.text(), "30");
        assert_eq!(age.datatype().unwrap().as_str(), xsd::INTEGER);
        assert!(rs.get_uri(3).is_err());

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_uri(1).unwrap().unwrap().as_str(), "http://example.org/bob");
        assert_eq!(rs.get_object(2).unwrap(), None);
        assert!(!rs.next().unwrap());
    }

    #[test]
    fn test_prefixed_elements() {
        let doc = r#"<res:sparql xmlns:res="http://www.w3.org/2005/sparql-results#">
            <res:head/><res:boolean>false</res:boolean></res:sparql>"#;
        let rs = parse(doc).unwrap();
        assert_eq!(rs.as_boolean().unwrap().value(), false);
    }

    #[test]
    fn test_boolean_without_head() {
        let rs = parse("<sparql><boolean>true</boolean></sparql>").unwrap();
        assert!(rs.as_boolean().unwrap().value());
    }

    #[test]
    fn test_boolean_text_is_strict() {
        let msg = grammar_error("<sparql><head/><boolean>TRUE</boolean></sparql>");
        assert!(msg.contains("TRUE"));
    }

    #[test]
    fn test_undeclared_binding_variable() {
        let doc = r#"<sparql><head><variable name="x"/></head><results>
            <result><binding name="y"><bnode>b</bnode></binding></result>
            </results></sparql>"#;
        let msg = grammar_error(doc);
        assert!(msg.contains("binding variable 'y' not present in header"));
    }

    #[test]
    fn test_variable_after_link() {
        let doc = r#"<sparql><head><link href="foo:bar"/><variable name="x"/></head>
            <results/></sparql>"#;
        grammar_error(doc);
    }

    #[test]
    fn test_duplicate_variable() {
        let doc = r#"<sparql><head><variable name="x"/><variable name="x"/></head><results/></sparql>"#;
        assert!(grammar_error(doc).contains("declared twice"));
    }

    #[test]
    fn test_malformed_uri_names_text() {
        let doc = r#"<sparql><head><variable name="x"/></head><results>
            <result><binding name="x"><uri>http://bad uri/</uri></binding></result>
            </results></sparql>"#;
        assert!(grammar_error(doc).contains("http://bad uri/"));
    }

    #[test]
    fn test_literal_with_lang_and_datatype() {
        let doc = r#"<sparql><head><variable name="x"/></head><results>
            <result><binding name="x">
              <literal xml:lang="en" datatype="http://www.w3.org/2001/XMLSchema#string">a</literal>
            </binding></result></results></sparql>"#;
        assert!(grammar_error(doc).contains("both"));
    }

    #[test]
    fn test_unknown_element() {
        let msg = grammar_error("<sparql><head/><answers/></sparql>");
        assert!(msg.contains("unknown element <answers>"));
    }

    #[test]
    fn test_results_before_head() {
        grammar_error("<sparql><results/></sparql>");
    }

    #[test]
    fn test_unterminated_document() {
        let doc = r#"<sparql><head><variable name="x"/></head><results><result>"#;
        assert!(parse(doc).is_err());
    }

    #[test]
    fn test_empty_document_has_no_result() {
        assert!(grammar_error("<sparql><head/></sparql>").len() > 0);
    }

    #[test]
    fn test_stray_text() {
        assert!(grammar_error("<sparql><head>oops</head></sparql>").contains("oops"));
    }

    #[test]
    fn test_handler_events() {
        let mut handler = XmlResultsHandler::new(None);
        let name = vec![("name".to_string(), "x".to_string())];
        handler.open("sparql", &[]).unwrap();
        handler.open("head", &[]).unwrap();
        handler.open("variable", &name).unwrap();
        handler.close("variable").unwrap();
        handler.close("head").unwrap();
        handler.open("results", &[]).unwrap();
        handler.open("result", &[]).unwrap();
        handler.open("binding", &name).unwrap();
        handler.open("literal", &[]).unwrap();
        handler.characters("  split ").unwrap();
        handler.characters("text  ").unwrap();
        handler.close("literal").unwrap();
        assert!(handler.open("uri", &[]).is_err());
    }

    #[test]
    fn test_results_after_boolean() {
        let doc = r#"<sparql><boolean>true</boolean><head><variable name="x"/></head><results/></sparql>"#;
        assert!(grammar_error(doc).contains("<head> cannot follow a result"));
    }

    #[test]
    fn test_second_boolean() {
        grammar_error("<sparql><boolean>true</boolean><head/><boolean>false</boolean></sparql>");
        grammar_error("<sparql><head/><boolean>true</boolean><boolean>false</boolean></sparql>");
        grammar_error("<sparql><boolean>true</boolean><boolean>false</boolean></sparql>");
    }

    #[test]
    fn test_second_results() {
        let doc = r#"<sparql><head><variable name="x"/></head><results/><results/></sparql>"#;
        grammar_error(doc);
    }

    #[test]
    fn test_empty_binding_is_unbound() {
        let doc = r#"<sparql><head><variable name="x"/><variable name="y"/></head><results>
            <result><binding name="x"/><binding name="y"><bnode>b</bnode></binding></result>
            </results></sparql>"#;
        let mut rs = parse(doc).unwrap();
        assert!(rs.next().unwrap());
        assert_eq!(rs.get_object(1).unwrap(), None);
        assert!(rs.get_object(2).unwrap().unwrap().is_blank_node());
    }

    #[test]
    fn test_second_root_rejected() {
        let mut handler = XmlResultsHandler::new(None);
        handler.open("sparql", &[]).unwrap();
        assert!(handler.open("sparql", &[]).is_err());
    }
}
