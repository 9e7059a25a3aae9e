use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tablegen_core::{loader, Config, JsonSource, MetadataSource, TableMapping};
use tokio::task::JoinSet;

#[derive(clap::Args)]
pub struct Args {
    /// Metadata snapshot file to generate from
    #[arg(long)]
    snapshot: PathBuf,

    /// User configuration file; absent means "generate everything"
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "generated")]
    out: PathBuf,

    /// Per-base timeout in seconds for the remote reads
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

pub async fn exec(args: Args) -> Result<()> {
    let config = Arc::new(Config::load(args.config.as_deref())?);
    let source: Arc<dyn MetadataSource> = Arc::new(JsonSource::from_file(&args.snapshot)?);
    let timeout = Duration::from_secs(args.timeout);

    let bases = loader::select_bases(source.as_ref(), &config, timeout).await?;
    anyhow::ensure!(!bases.is_empty(), "no bases selected for generation");

    // Bases are independent: fan out, and let each one fail alone.
    let mut tasks = JoinSet::new();
    for base in bases {
        let source = Arc::clone(&source);
        let config = Arc::clone(&config);
        let out = args.out.clone();
        tasks.spawn(async move {
            let name = base.name.clone();
            let result = generate_base(source.as_ref(), &config, base, timeout, &out).await;
            (name, result)
        });
    }

    let mut total = 0;
    let mut failures = 0;
    while let Some(joined) = tasks.join_next().await {
        let (name, result) = joined?;
        total += 1;
        match result {
            Ok(tables) => tracing::info!(base = %name, tables, "base generated"),
            Err(err) => {
                failures += 1;
                tracing::error!(base = %name, error = %err, "base generation failed");
            }
        }
    }
    anyhow::ensure!(failures < total, "every base failed to generate");
    Ok(())
}

async fn generate_base(
    source: &dyn MetadataSource,
    config: &Config,
    base: tablegen_core::Base,
    timeout: Duration,
    out: &Path,
) -> Result<usize> {
    let loaded = loader::load_base(source, base, timeout).await?;
    let base_config = config.base_config(&loaded.base);

    let base_dir = out.join(&loaded.base.id);
    fs::create_dir_all(&base_dir)?;

    // Tables within a base are processed strictly sequentially; mapping and
    // collision logic is table-local.
    let mut generated = 0;
    for table in &loaded.tables {
        let table_config = base_config.and_then(|block| block.table_config(&table.name));

        // An explicit table list restricts generation to the tables it names.
        let restricted = base_config.is_some_and(|block| !block.tables.is_empty());
        if restricted && table_config.is_none() {
            continue;
        }

        let mapping = TableMapping::build(table, &loaded.tables, table_config);
        for file in tablegen_codegen::generate_table(&mapping)? {
            let path = base_dir.join(&file.path);
            println!("  {:>10}    {}", "writing", path.display());
            fs::write(path, file.contents)?;
        }
        generated += 1;
    }

    Ok(generated)
}
