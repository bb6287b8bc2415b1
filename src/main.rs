use anyhow::{Context, Result};
use ldgraph::{
    MemoryStorage, Namespaces, RdfFormat, RdfWriter, Storage, Value, WriterConfig,
};
use tracing::info;

const EX: &str = "http://example.org/";
const DC: &str = "http://purl.org/dc/terms/";

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("ldgraph v{}", ldgraph::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => WriterConfig::from_yaml_file(&path)
            .with_context(|| format!("cannot load writer config {}", path))?,
        None => WriterConfig::default(),
    };
    info!("Using {:?}", config);

    let book = Value::from(build_book()?);

    println!("=== {} ===", config.format);
    let writer = RdfWriter::from_config(&config)?;
    println!("{}", writer.write_to_string(&book)?);

    println!("=== XML ===");
    let mut namespaces = Namespaces::new();
    namespaces.add_prefix("dc", DC)?;
    let xml = RdfWriter::new(RdfFormat::Xml)
        .with_namespaces(namespaces)
        .with_indent(config.indent)
        .write_to_string(&book)?;
    println!("{}", xml);

    Ok(())
}

fn build_book() -> Result<ldgraph::NamedNode> {
    let storage = MemoryStorage::new();

    let book = storage.create_typed_named_node(
        &format!("{}book/moby-dick", EX),
        &format!("{}Book", EX),
    )?;
    book.put(format!("{}title", DC), storage.create_literal("Moby Dick"));
    book.put(
        format!("{}description", DC),
        storage.create_lang_string("A whaling voyage told by Ishmael.", "en")?,
    );
    book.put(
        format!("{}creator", DC),
        storage.create_leaf("http://example.org/person/melville", None)?,
    );

    let chapter = storage.create_typed_node(&format!("{}Chapter", EX))?;
    chapter.add(storage.create_literal("Loomings"))?;
    book.add(chapter)?;

    Ok(book)
}
