use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use country_stats::config::{GDP_INDICATOR, POPULATION_INDICATOR};
use country_stats::report::{self, CountryReport};
use country_stats::{
    CodeTable, Config, CountryCodeResolver, FetchError, HistoricalSeries, Session, YearRange,
};
use country_stats::{stats, storage, viz};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "cstats",
    version,
    about = "Country facts, neighbor populations and World Bank history in one report"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Base URL of the country facts API.
    #[arg(long, global = true, default_value = "https://restcountries.com/v3.1")]
    facts_url: String,
    /// Base URL of the historical indicators API.
    #[arg(long, global = true, default_value = "https://api.worldbank.org/v2")]
    indicators_url: String,
    /// Total request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// JSON file mapping country name to a fun fact.
    #[arg(long, global = true, default_value = "data/fun_facts.json")]
    fun_facts: PathBuf,
    /// Neighbor lookups in flight at once (1 = sequential).
    #[arg(long, global = true, default_value_t = 1)]
    parallel: usize,
    /// TTF font used for chart text.
    #[arg(long, global = true)]
    font: Option<PathBuf>,
    /// Alternative country table (JSON array of name/alpha2/alpha3/numeric rows).
    #[arg(long, global = true)]
    country_table: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full report for one or more countries (and optionally charts).
    Show(ShowArgs),
    /// Fetch one indicator series (and optionally save, plot, and print stats).
    History(HistoryArgs),
    /// Resolve a country name to its alpha-3 code, or a code to its name.
    Resolve {
        /// Country name or alpha-2/alpha-3 code
        query: String,
    },
    /// List all known country names with their codes.
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartFormat {
    Svg,
    Png,
}

impl ChartFormat {
    fn ext(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Country names; repeat the flag or separate with semicolons.
    #[arg(short, long = "country", required = true)]
    countries: Vec<String>,
    /// First year of the historical charts.
    #[arg(long, default_value_t = country_stats::config::DEFAULT_START_YEAR)]
    from: i32,
    /// Last year of the historical charts.
    #[arg(long, default_value_t = country_stats::config::DEFAULT_END_YEAR)]
    to: i32,
    /// Write charts into this directory.
    #[arg(long)]
    plot_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ChartFormat::Svg)]
    format: ChartFormat,
    /// Width of each chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Country name or alpha-3 code
    #[arg(short, long)]
    country: String,
    /// Indicator id (e.g., SP.POP.TOTL)
    #[arg(short, long, default_value = POPULATION_INDICATOR)]
    indicator: String,
    #[arg(long, default_value_t = country_stats::config::DEFAULT_START_YEAR)]
    from: i32,
    #[arg(long, default_value_t = country_stats::config::DEFAULT_END_YEAR)]
    to: i32,
    /// Save the series to a file (.csv or .json).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn parse_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .flat_map(|s| s.split(';'))
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config {
        facts_base_url: cli.global.facts_url.clone(),
        indicators_base_url: cli.global.indicators_url.clone(),
        timeout: Duration::from_secs(cli.global.timeout),
        fun_facts_path: cli.global.fun_facts.clone(),
        neighbor_parallelism: cli.global.parallel.max(1),
        font_path: cli.global.font.clone(),
        ..Config::default()
    };
    let table = match &cli.global.country_table {
        Some(p) => CodeTable::from_json_file(p)
            .with_context(|| format!("load country table {}", p.display()))?,
        None => CodeTable::embedded(),
    };

    match cli.cmd {
        Command::Resolve { query } => cmd_resolve(&table, &query),
        Command::List => cmd_list(&table),
        Command::Show(args) => {
            let client = country_stats::Client::new(&config)?;
            let mut session = Session::with_parts(&config, client, Box::new(table));
            cmd_show(&mut session, &config, args)
        }
        Command::History(args) => {
            let client = country_stats::Client::new(&config)?;
            let mut session = Session::with_parts(&config, client, Box::new(table));
            cmd_history(&mut session, &config, args)
        }
    }
}

fn cmd_resolve(table: &CodeTable, query: &str) -> Result<()> {
    if let Some(code) = table.code_for_name(query) {
        println!("{code}");
        return Ok(());
    }
    match table.lookup(query) {
        Some(entry) => {
            println!("{}", entry.name);
            Ok(())
        }
        None => bail!("{}", FetchError::NameResolution(query.trim().to_string())),
    }
}

fn cmd_list(table: &CodeTable) -> Result<()> {
    for e in table.entries() {
        println!("{}\t{}", e.alpha3, e.name);
    }
    Ok(())
}

fn cmd_show(session: &mut Session, config: &Config, args: ShowArgs) -> Result<()> {
    let names = parse_list(&args.countries);
    let years = YearRange::new(args.from, args.to);
    let results = session.reports(&names, years);

    if args.json {
        let out: Vec<serde_json::Value> = results
            .iter()
            .map(|(name, res)| match res {
                Ok(r) => report::report_to_json(r),
                Err(e) => report::failure_to_json(name, e),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (name, res) in &results {
            match res {
                Ok(r) => println!("{}", report::render_text(r, &args.locale)),
                Err(e) => println!("{}\n", report::render_failure(name, e)),
            }
        }
    }

    if let Some(dir) = args.plot_dir.as_ref() {
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        if let Err(e) = viz::ensure_font(config.font_path.as_deref()) {
            eprintln!("Skipping charts: {e}");
            return Ok(());
        }
        for r in results.iter().filter_map(|(_, res)| res.as_ref().ok()) {
            write_charts(r, dir, &args);
        }
    }
    Ok(())
}

/// Each chart fails on its own; a failure is reported and the next one is tried.
fn write_charts(r: &CountryReport, dir: &Path, args: &ShowArgs) {
    let code = &r.record.code;
    let ext = args.format.ext();

    let path = dir.join(format!("{code}_neighbors.{ext}"));
    let neighbors =
        viz::plot_neighbor_populations(&r.neighbors, &path, args.width, args.height, &args.locale);
    match neighbors {
        Ok(()) => eprintln!("Wrote plot to {}", path.display()),
        Err(e) => eprintln!("No neighbor chart for {}: {}", r.record.name, e),
    }

    let sections: [(&str, &str, &str, &std::result::Result<HistoricalSeries, FetchError>); 2] = [
        ("gdp", "GDP", "GDP (USD)", &r.gdp),
        ("population", "Population", "Population", &r.population),
    ];
    for (slug, label, y_label, series) in sections {
        let path = dir.join(format!("{code}_{slug}.{ext}"));
        let title = format!("Historical {} of {}", label, r.record.name);
        let res = match series {
            Ok(s) => viz::plot_series(
                s,
                &path,
                args.width,
                args.height,
                &title,
                y_label,
                &args.locale,
            ),
            Err(e) => Err(anyhow::anyhow!("{}", e)),
        };
        match res {
            Ok(()) => eprintln!("Wrote plot to {}", path.display()),
            Err(e) => eprintln!("No historical {} chart for {}: {}", label, r.record.name, e),
        }
    }
}

fn cmd_history(session: &mut Session, config: &Config, args: HistoryArgs) -> Result<()> {
    let code = match session.resolver().code_for_name(&args.country) {
        Some(code) => code.to_string(),
        None => match session.resolver().name_for_code(&args.country) {
            Some(_) => args.country.trim().to_ascii_uppercase(),
            None => bail!("{}", FetchError::NameResolution(args.country.clone())),
        },
    };
    let years = YearRange::new(args.from, args.to);
    let series = session.historical_series(&code, &args.indicator, years)?;

    if let Some(path) = args.out.as_ref() {
        storage::save_series(&series, path)?;
        eprintln!("Saved {} rows to {}", series.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        viz::ensure_font(config.font_path.as_deref())?;
        let title = series
            .indicator_name
            .clone()
            .unwrap_or_else(|| series.indicator_id.clone());
        let y_label = if args.indicator == GDP_INDICATOR {
            "GDP (USD)"
        } else {
            "Value"
        };
        let title = format!("{title} - {code}");
        viz::plot_series(&series, plot_path, 1000, 600, &title, y_label, "en")?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        match stats::summarize(&series) {
            Some(s) => println!(
                "{} • {}  count={}  years={}-{}  min={} max={} mean={} median={}",
                s.country_code,
                s.indicator_id,
                s.count,
                s.first_year,
                s.last_year,
                report::format_number(s.min, &num_format::Locale::en),
                report::format_number(s.max, &num_format::Locale::en),
                report::format_number(s.mean, &num_format::Locale::en),
                report::format_number(s.median, &num_format::Locale::en),
            ),
            None => println!("{} • {}  no data", code, args.indicator),
        }
    } else if args.out.is_none() && args.plot.is_none() {
        for o in &series.observations {
            println!("{}\t{}", o.year, o.value);
        }
    }
    Ok(())
}
