use sparcur::results::{ResultCursor, SparqlType};
use sparcur::{BufferedResponse, ClientError, ResponseType, ResultBuilder};

const ASK_XML: &str = r#"<?xml version="1.0"?>
<sparql xmlns="http://www.w3.org/2005/sparql-results#">
  <head/>
  <boolean>true</boolean>
</sparql>"#;

const SELECT_JSON: &str = r#"{
  "head": { "vars": ["s"] },
  "results": { "bindings": [
    { "s": { "type": "uri", "value": "http://example.org/a" } },
    { "s": { "type": "bnode", "value": "b0" } }
  ] }
}"#;

const GRAPH_XML: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:ex="http://example.org/">
  <rdf:Description rdf:about="http://example.org/a">
    <ex:p>v</ex:p>
  </rdf:Description>
</rdf:RDF>"#;

const GRAPH_N3: &str = "<http://example.org/a> <http://example.org/p> \"v\" .\n";

#[test]
fn test_dispatch_each_type() {
    let cases = [
        ("application/sparql-results+xml", ASK_XML, SparqlType::Boolean, 1),
        ("application/sparql-results+json", SELECT_JSON, SparqlType::Bindings, 2),
        ("application/rdf+xml", GRAPH_XML, SparqlType::Graph, 1),
        ("text/rdf+n3", GRAPH_N3, SparqlType::Graph, 1),
    ];
    for (mime, body, kind, rows) in cases {
        let mut response = BufferedResponse::new(mime, body);
        let mut rs = ResultBuilder::create_result(&mut response, None).unwrap();
        assert_eq!(rs.sparql_type(), kind, "{}", mime);
        rs.last();
        assert_eq!(rs.get_row(), rows, "{}", mime);
    }
}

#[test]
fn test_content_type_params_ignored() {
    let mut response = BufferedResponse::new("application/sparql-results+json; charset=UTF-8", SELECT_JSON);
    let rs = ResultBuilder::create_result(&mut response, None).unwrap();
    assert_eq!(rs.sparql_type(), SparqlType::Bindings);
}

#[test]
fn test_unknown_content_type() {
    let mut response = BufferedResponse::new("text/plain", ASK_XML);
    assert!(matches!(
        ResultBuilder::create_result(&mut response, None),
        Err(ClientError::Unhandled(_))
    ));
}

#[test]
fn test_content_type_decides_parser() {
    // XML body declared as JSON fails in the JSON parser
    let mut response = BufferedResponse::new(ResponseType::SparqlJson.mime_type(), ASK_XML);
    assert!(matches!(
        ResultBuilder::create_result(&mut response, None),
        Err(ClientError::Parse(_))
    ));
}
