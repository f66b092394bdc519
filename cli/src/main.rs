//! Sparcur CLI: run SPARQL queries against a remote endpoint
//!
//! Results are printed as a table, CSV, or (for graph results) Turtle.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use sparcur::client::{Connection, ConnectionConfig, Driver};
use sparcur::rdf::Node;
use sparcur::results::{ResultCursor, ResultSet};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "sparcur", version, about = "SPARQL endpoint client")]
struct Cli {
    /// SPARQL endpoint URL
    #[arg(long, global = true, env = "SPARCUR_ENDPOINT")]
    endpoint: Option<String>,

    /// YAML connection configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Default graph URI (repeatable)
    #[arg(long = "default-graph", global = true)]
    default_graphs: Vec<String>,

    /// Named graph URI (repeatable)
    #[arg(long = "named-graph", global = true)]
    named_graphs: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Turtle,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a SPARQL query
    Query {
        /// The SPARQL query string
        sparql: Option<String>,

        /// Read the query from a file
        #[arg(long, conflicts_with = "sparql")]
        file: Option<PathBuf>,
    },
    /// Start an interactive REPL
    Shell,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = connect(&cli).and_then(|conn| match &cli.command {
        Commands::Query { sparql, file } => {
            let query = match (sparql, file) {
                (Some(q), _) => q.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => return Err("a query string or --file is required".into()),
            };
            run_query(&conn, &query, cli.format)
        }
        Commands::Shell => run_shell(&conn, cli.format),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn connect(cli: &Cli) -> CliResult<Connection> {
    let mut config = match &cli.config {
        Some(path) => ConnectionConfig::from_file(path)?,
        None => ConnectionConfig::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    config.default_graphs.extend(cli.default_graphs.iter().cloned());
    config.named_graphs.extend(cli.named_graphs.iter().cloned());

    let driver = Driver::from_config(config);
    let conn = driver.connect_default()?;
    debug!(endpoint = conn.endpoint(), "connected");
    Ok(conn)
}

fn run_query(conn: &Connection, query: &str, format: OutputFormat) -> CliResult<()> {
    let mut statement = conn.create_statement();
    let mut rs = statement.execute_query(query)?;

    match format {
        OutputFormat::Turtle => {
            let graph = rs
                .graph()
                .ok_or("turtle output needs a CONSTRUCT or DESCRIBE query")?;
            graph.write_turtle(std::io::stdout().lock())?;
            println!();
        }
        OutputFormat::Csv => {
            let columns = column_names(&rs);
            println!("{}", columns.join(","));
            for row in collect_rows(&mut rs)? {
                let cells: Vec<String> = row.iter().map(|c| format_csv_value(c.as_ref())).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            let columns = column_names(&rs);
            let rows = collect_rows(&mut rs)?;

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&columns);
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|c| format_table_value(c.as_ref())).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }

    rs.close();
    Ok(())
}

fn column_names(rs: &ResultSet) -> Vec<String> {
    rs.meta_data()
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn collect_rows(rs: &mut ResultSet) -> CliResult<Vec<Vec<Option<Node>>>> {
    let width = rs.meta_data().column_count();
    let mut rows = Vec::new();
    rs.before_first();
    while rs.next()? {
        let mut row = Vec::with_capacity(width);
        for column in 1..=width {
            row.push(rs.get_object(column)?.cloned());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn run_shell(conn: &Connection, format: OutputFormat) -> CliResult<()> {
    println!("Sparcur Interactive Shell ({})", conn.endpoint());
    println!("Type SPARQL queries ending with ';', or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();
    let mut buffer = String::new();

    loop {
        eprint!("{}", if buffer.is_empty() { "sparql> " } else { "   ...> " });

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if buffer.is_empty() {
            match trimmed {
                ":quit" | ":exit" | ":q" => break,
                ":help" | ":h" => {
                    println!("Commands:");
                    println!("  :endpoint  Show the endpoint");
                    println!("  :quit      Exit shell");
                    println!("  <sparql>;  Execute a SPARQL query");
                    continue;
                }
                ":endpoint" => {
                    println!("{}", conn.endpoint());
                    continue;
                }
                _ => {}
            }
        }

        buffer.push_str(&line);
        if let Some(query) = buffer.trim_end().strip_suffix(';') {
            if let Err(e) = run_query(conn, query, format) {
                eprintln!("Error: {}", e);
            }
            buffer.clear();
        }
    }

    println!("Bye!");
    Ok(())
}

fn format_table_value(v: Option<&Node>) -> String {
    match v {
        None => String::new(),
        Some(Node::Literal(l)) if l.language().is_none() && l.datatype().is_none() => {
            l.text().to_string()
        }
        Some(node) => node.to_string(),
    }
}

fn format_csv_value(v: Option<&Node>) -> String {
    let s = match v {
        None => return String::new(),
        Some(node) => node.lexical_form(),
    };
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
