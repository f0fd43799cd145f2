//! aida-query - extract graph queries from an AIDA knowledge base
//!
//! Usage:
//!   aida-query --endpoint http://localhost:3030/rpi_en/ events
//!   aida-query --ttl kb/doc1.ttl edges http://www.isi.edu/gaia/events/e1
//!   aida-query --ttl kb/doc1.ttl build http://www.isi.edu/gaia/events/e1 --id Q1 --out-dir out
//!   aida-query to-xml out/Q1.json --id Q1 --out out/Q1.xml

use aida_query::codec::{self, Payload};
use aida_query::config::{EndpointConfig, StoreKind};
use aida_query::core::{make_entry_point, GraphQuery};
use aida_query::extraction::{GraphQueryBuilder, KnowledgeGraphExtractor};
use aida_query::querying::{ExclusionSet, HttpQueryExecutor, OxigraphExecutor, QueryExecutor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "aida-query")]
#[command(about = "Extract graph queries from an AIDA knowledge base", long_about = None)]
struct Args {
    /// SPARQL endpoint base URL (queries go to <endpoint>/query)
    #[arg(short, long, env = "AIDA_SPARQL_ENDPOINT")]
    endpoint: Option<String>,

    /// Endpoint flavour: jena or oxigraph
    #[arg(long)]
    store: Option<String>,

    /// Bearer token for the endpoint
    #[arg(long, env = "AIDA_SPARQL_TOKEN")]
    token: Option<String>,

    /// Transport timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON endpoint configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Query a local Turtle file instead of an endpoint (takes precedence)
    #[arg(long)]
    ttl: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all event URIs
    Events,

    /// List role predicates used by events and relations
    Roles,

    /// Show the edges of a node, grouped by predicate
    Edges {
        uri: String,

        /// Follow edges pointing at the node instead of leaving it
        #[arg(long)]
        reverse: bool,

        /// Predicate to leave out (full URI or LDC ontology local name)
        #[arg(long = "exclude-predicate")]
        exclude_predicates: Vec<String>,

        /// Object (or subject with --reverse) to leave out
        #[arg(long = "exclude-node")]
        exclude_nodes: Vec<String>,
    },

    /// Show the entry point descriptors of an entity
    Entrypoint { uri: String },

    /// Build the graph query rooted at an event or relation
    Build {
        uri: String,

        /// Query id used for the XML document and file names
        #[arg(long)]
        id: String,

        /// Write <id>.json and <id>.xml here instead of printing
        #[arg(long)]
        out_dir: Option<String>,
    },

    /// Convert a JSON graph query into its XML document
    ToXml {
        input: PathBuf,

        #[arg(long)]
        id: String,

        #[arg(long)]
        out: Option<String>,
    },

    /// Convert an XML graph query document into JSON
    FromXml {
        input: PathBuf,

        #[arg(long)]
        out: Option<String>,
    },
}

fn endpoint_config(args: &Args) -> Result<EndpointConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EndpointConfig::from_file(path)?,
        None => EndpointConfig::default(),
    };
    if let Some(url) = &args.endpoint {
        config.url = url.clone();
    }
    if let Some(store) = &args.store {
        config.store = StoreKind::from_string(store)
            .ok_or_else(|| format!("Unsupported store type: {}", store))?;
    }
    if args.token.is_some() {
        config.auth_token = args.token.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

fn executor(args: &Args) -> Result<Box<dyn QueryExecutor>, Box<dyn std::error::Error>> {
    if let Some(ttl) = &args.ttl {
        return Ok(Box::new(OxigraphExecutor::from_turtle_file(ttl)?));
    }
    let config = endpoint_config(args)?;
    info!(endpoint = %config.url, store = ?config.store, "using SPARQL endpoint");
    Ok(Box::new(HttpQueryExecutor::new(config)?))
}

fn open_extractor(
    args: &Args,
) -> Result<KnowledgeGraphExtractor<Box<dyn QueryExecutor>>, Box<dyn std::error::Error>> {
    Ok(KnowledgeGraphExtractor::new(executor(args)?))
}

fn emit(payload: &Payload, out: Option<&str>) -> aida_query::Result<()> {
    match out {
        Some(path) => payload.write_file(path),
        None => payload.pretty_print(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    match &args.command {
        Command::Events => {
            let extractor = open_extractor(&args)?;
            Payload::json(&extractor.list_event_uris()?)?.pretty_print()?;
        }
        Command::Roles => {
            let extractor = open_extractor(&args)?;
            let roles: serde_json::Map<String, serde_json::Value> = extractor
                .list_role_edges_by_type()?
                .into_iter()
                .map(|(kind, predicates)| (kind.as_str().to_string(), predicates.into()))
                .collect();
            Payload::Json(roles.into()).pretty_print()?;
        }
        Command::Edges { uri, reverse, exclude_predicates, exclude_nodes } => {
            let extractor = open_extractor(&args)?;
            let predicates: ExclusionSet = exclude_predicates.iter().cloned().collect();
            let nodes: ExclusionSet = exclude_nodes.iter().cloned().collect();
            let groups = if *reverse {
                extractor.edges_of_object(uri, &predicates, &nodes)?
            } else {
                extractor.edges_of_subject(uri, &predicates, &nodes)?
            };
            Payload::json(&groups)?.pretty_print()?;
        }
        Command::Entrypoint { uri } => {
            let extractor = open_extractor(&args)?;
            let enttype = extractor.entity_type(uri)?;
            let descriptors = extractor.entry_point_descriptors(uri)?;
            Payload::json(&make_entry_point(uri, &enttype, descriptors))?.pretty_print()?;
        }
        Command::Build { uri, id, out_dir } => {
            let extractor = open_extractor(&args)?;
            let query = GraphQueryBuilder::new(&extractor).build(uri)?;
            let json = Payload::json(&query)?;
            let xml = Payload::Xml(codec::to_xml(&query, id));
            match out_dir {
                Some(dir) => {
                    let dir = dir.trim_end_matches('/');
                    json.write_file(&format!("{}/{}.json", dir, id))?;
                    xml.write_file(&format!("{}/{}.xml", dir, id))?;
                }
                None => {
                    json.pretty_print()?;
                    xml.pretty_print()?;
                }
            }
        }
        Command::ToXml { input, id, out } => {
            let query: GraphQuery = serde_json::from_str(&std::fs::read_to_string(input)?)?;
            emit(&Payload::Xml(codec::to_xml(&query, id)), out.as_deref())?;
        }
        Command::FromXml { input, out } => {
            let (id, query) = codec::parse_xml_str(&std::fs::read_to_string(input)?)?;
            info!(%id, "decoded query document");
            emit(&Payload::json(&query)?, out.as_deref())?;
        }
    }

    Ok(())
}
