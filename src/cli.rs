//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, CsvExporter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::mock_market_adapter::MockMarketAdapter;
use crate::adapters::rand_adapter::StdRandom;
use crate::adapters::svg_chart::render_price_chart;
use crate::domain::config_validation::validate_app_config;
use crate::domain::error::MockstreetError;
use crate::domain::filter::{DateRange, SearchTerm};
use crate::domain::format::{format_change, format_change_percent, format_price};
use crate::domain::holding::{
    allocations, refresh_quotes, Holding, HoldingQuery, HoldingSort, PortfolioSummary,
};
use crate::domain::series::{
    generate_series_with, PricePoint, SeriesParams, DEFAULT_SERIES_DAYS,
};
use crate::domain::stock::{MarketSummary, Stock, StockFilter, StockQuery, StockSort};
use crate::domain::table::{page_window, process, Page, DEFAULT_PAGE_SIZE};
use crate::domain::trade::{execute_trade, TradeConfirmation, TradeTicket, DEFAULT_BALANCE};
use crate::domain::transaction::{
    Transaction, TransactionQuery, TransactionSort, TransactionSummary, TradeType,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::export_port::ExportPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::random_port::RandomPort;

/// Number of page buttons shown by the pager line.
const PAGER_WIDTH: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "mockstreet", about = "Mock stock market browser and trade simulator")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Search and paging flags shared by the table views.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stocks
    Stocks {
        #[command(flatten)]
        table: TableArgs,
        /// all, gainers or losers
        #[arg(long, default_value = "all")]
        filter: String,
        /// symbol, name, price, change or change-percent
        #[arg(long, default_value = "symbol")]
        sort: String,
    },
    /// Print a synthetic price history for a symbol
    Chart {
        symbol: String,
        #[arg(long)]
        days: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the chart as SVG to this path
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Show portfolio holdings
    Portfolio {
        #[command(flatten)]
        table: TableArgs,
        /// symbol, value, profit-loss, profit-loss-percent or day-change
        #[arg(long, default_value = "symbol")]
        sort: String,
        /// Jitter quotes before showing them
        #[arg(long)]
        refresh: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show transaction history
    Transactions {
        #[command(flatten)]
        table: TableArgs,
        /// all, buy or sell
        #[arg(long = "type", default_value = "all")]
        trade_type: String,
        /// all, today, week or month
        #[arg(long, default_value = "all")]
        date: String,
        /// newest, oldest, amount or symbol
        #[arg(long, default_value = "newest")]
        sort: String,
        /// Write the filtered history as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Place a simulated order
    Trade {
        symbol: String,
        /// buy or sell
        #[arg(long, default_value = "buy")]
        side: String,
        #[arg(short, long)]
        qty: u32,
        /// Limit price; defaults to the last price
        #[arg(long)]
        price: Option<f64>,
        /// Cash balance; defaults to [account] balance
        #[arg(long)]
        balance: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate a configuration file
    Validate,
}

/// Effective settings after config defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub page_size: usize,
    pub chart_days: usize,
    pub series: SeriesParams,
    pub seed: Option<u64>,
    pub balance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            chart_days: DEFAULT_SERIES_DAYS,
            series: SeriesParams::default(),
            seed: None,
            balance: DEFAULT_BALANCE,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match cli.config.as_deref().map(load_config).transpose() {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let config = config.as_ref().map(|c| c as &dyn ConfigPort);

    let settings = match config.map(build_settings).transpose() {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => return fail(&e),
    };
    let data = match build_data_port(config) {
        Ok(d) => d,
        Err(e) => return fail(&e),
    };
    let now = Utc::now();

    let result = match cli.command {
        Command::Stocks {
            table,
            filter,
            sort,
        } => {
            let query = StockQuery {
                search: search_term(&table),
                filter: StockFilter::from_key(&filter),
                sort: StockSort::from_key(&sort),
            };
            stocks_command(
                data.as_ref(),
                &query,
                table.page,
                table.page_size.unwrap_or(settings.page_size),
            )
        }
        Command::Chart {
            symbol,
            days,
            seed,
            svg,
        } => run_chart(
            data.as_ref(),
            &symbol,
            days.unwrap_or(settings.chart_days),
            &settings.series,
            seed.or(settings.seed),
            svg.as_deref(),
        ),
        Command::Portfolio {
            table,
            sort,
            refresh,
            seed,
        } => {
            let query = HoldingQuery {
                search: search_term(&table),
                sort: HoldingSort::from_key(&sort),
            };
            let mut rng = StdRandom::from_seed_option(seed.or(settings.seed));
            portfolio_command(
                data.as_ref(),
                &query,
                table.page,
                table.page_size.unwrap_or(settings.page_size),
                refresh.then_some(&mut rng as &mut dyn RandomPort),
            )
        }
        Command::Transactions {
            table,
            trade_type,
            date,
            sort,
            export,
        } => {
            let query = TransactionQuery {
                search: search_term(&table),
                trade_type: TradeType::category_from_key(&trade_type),
                date_range: DateRange::from_key(&date),
                sort: TransactionSort::from_key(&sort),
            };
            let exporter = CsvExporter;
            transactions_command(
                data.as_ref(),
                &query,
                now,
                table.page,
                table.page_size.unwrap_or(settings.page_size),
                export
                    .as_deref()
                    .map(|path| (&exporter as &dyn ExportPort, path)),
            )
        }
        Command::Trade {
            symbol,
            side,
            qty,
            price,
            balance,
            seed,
        } => {
            let mut rng = StdRandom::from_seed_option(seed.or(settings.seed));
            parse_side(&side).and_then(|side| {
                trade_command(
                    data.as_ref(),
                    &symbol,
                    side,
                    qty,
                    price,
                    balance.unwrap_or(settings.balance),
                    now,
                    &mut rng,
                )
            })
        }
        Command::Validate => validate_command(config),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &MockstreetError) -> ExitCode {
    eprintln!("error: {e}");
    e.into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, MockstreetError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Validate `config` and read every setting, falling back to defaults for
/// absent keys.
pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, MockstreetError> {
    validate_app_config(config)?;

    let defaults = Settings::default();
    let seed = config
        .get_string("chart", "seed")
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| MockstreetError::ConfigInvalid {
                    section: "chart".into(),
                    key: "seed".into(),
                    reason: "seed must be a non-negative integer".into(),
                })
        })
        .transpose()?;

    Ok(Settings {
        page_size: config.get_int("table", "page_size", defaults.page_size as i64) as usize,
        chart_days: config.get_int("chart", "days", defaults.chart_days as i64) as usize,
        series: SeriesParams {
            volatility: config.get_double("chart", "volatility", defaults.series.volatility),
            trend_strength: config.get_double(
                "chart",
                "trend_strength",
                defaults.series.trend_strength,
            ),
            ..defaults.series
        },
        seed,
        balance: config.get_double("account", "balance", defaults.balance),
    })
}

/// Built-in demo data unless `[data] source = csv`.
pub fn build_data_port(
    config: Option<&dyn ConfigPort>,
) -> Result<Box<dyn MarketDataPort>, MockstreetError> {
    let source = config
        .and_then(|c| c.get_string("data", "source"))
        .unwrap_or_else(|| "mock".to_string());

    match source.trim().to_ascii_lowercase().as_str() {
        "csv" => {
            let dir = config
                .and_then(|c| c.get_string("data", "dir"))
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| MockstreetError::ConfigMissing {
                    section: "data".into(),
                    key: "dir".into(),
                })?;
            tracing::debug!(dir = %dir, "using csv data source");
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir.trim()))))
        }
        "mock" => Ok(Box::new(MockMarketAdapter::new())),
        other => Err(MockstreetError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unknown source '{other}', expected mock or csv"),
        }),
    }
}

fn search_term(table: &TableArgs) -> SearchTerm {
    SearchTerm::new(table.search.as_deref().unwrap_or_default())
}

pub fn parse_side(raw: &str) -> Result<TradeType, MockstreetError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "buy" => Ok(TradeType::Buy),
        "sell" => Ok(TradeType::Sell),
        other => Err(MockstreetError::invalid_argument(format!(
            "side must be buy or sell, got '{other}'"
        ))),
    }
}

/// "Showing 1-10 of 12 stocks | Page 1 of 2: [1] 2"
pub fn pager_line<T>(page: &Page<'_, T>, noun: &str) -> String {
    let buttons: Vec<String> = page_window(page.page, page.total_pages, PAGER_WIDTH)
        .map(|n| {
            if n == page.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    format!(
        "Showing {}-{} of {} {} | Page {} of {}: {}",
        page.first_index(),
        page.last_index(),
        page.total_count,
        noun,
        page.page,
        page.total_pages,
        buttons.join(" ")
    )
}

pub fn stocks_command(
    data: &dyn MarketDataPort,
    query: &StockQuery,
    page: usize,
    page_size: usize,
) -> Result<String, MockstreetError> {
    let stocks = data.stocks()?;
    let table_query = query.to_table_query();
    let result = process(&stocks, &table_query, page, page_size)?;
    tracing::debug!(
        matched = result.total_count,
        page = result.page,
        "stock listing"
    );

    let mut lines = Vec::new();
    let summary = MarketSummary::compute(&stocks);
    if let (Some(gainer), Some(loser)) = (summary.top_gainer, summary.top_loser) {
        lines.push(format!(
            "Top gainer: {} {} | Top loser: {} {} | {} stocks",
            gainer.symbol,
            format_change_percent(gainer.change_percent),
            loser.symbol,
            format_change_percent(loser.change_percent),
            summary.total
        ));
    }

    if result.is_empty() {
        lines.push("No stocks match.".to_string());
    } else {
        lines.push(format!(
            "{:<6} {:<20} {:>12} {:>8} {:>8} {:>7} {:>7}",
            "SYMBOL", "NAME", "PRICE", "CHANGE", "CHANGE%", "VOLUME", "MKT CAP"
        ));
        for s in &result.items {
            lines.push(format!(
                "{:<6} {:<20} {:>12} {:>8} {:>8} {:>7} {:>7}",
                s.symbol,
                s.name,
                format_price(s.last_price),
                format_change(s.change),
                format_change_percent(s.change_percent),
                s.volume,
                s.market_cap
            ));
        }
    }
    lines.push(pager_line(&result, "stocks"));
    Ok(lines.join("\n") + "\n")
}

/// Look up `symbol` and generate its trailing series.
pub fn chart_series(
    data: &dyn MarketDataPort,
    symbol: &str,
    days: usize,
    params: &SeriesParams,
    rng: &mut dyn RandomPort,
) -> Result<(Stock, Vec<PricePoint>), MockstreetError> {
    let stock = data.find_stock(symbol)?;
    let series = generate_series_with(stock.last_price, days, params, rng)?;
    tracing::debug!(symbol = %stock.symbol, points = series.len(), "generated series");
    Ok((stock, series))
}

pub fn render_chart(stock: &Stock, series: &[PricePoint]) -> String {
    let mut lines = vec![format!(
        "{} {} {} {} ({})",
        stock.symbol,
        stock.name,
        format_price(stock.last_price),
        format_change(stock.change),
        format_change_percent(stock.change_percent)
    )];
    for point in series {
        lines.push(format!("{:>6} {:>12}", point.label, format_price(point.price)));
    }
    lines.join("\n") + "\n"
}

fn run_chart(
    data: &dyn MarketDataPort,
    symbol: &str,
    days: usize,
    params: &SeriesParams,
    seed: Option<u64>,
    svg_path: Option<&Path>,
) -> Result<String, MockstreetError> {
    let mut rng = StdRandom::from_seed_option(seed);
    let (stock, series) = chart_series(data, symbol, days, params, &mut rng)?;
    if let Some(path) = svg_path {
        fs::write(path, render_price_chart(&series))?;
        eprintln!("Chart written to: {}", path.display());
    }
    Ok(render_chart(&stock, &series))
}

/// Holdings view. With `refresh` set, quotes are jittered first.
pub fn portfolio_command(
    data: &dyn MarketDataPort,
    query: &HoldingQuery,
    page: usize,
    page_size: usize,
    refresh: Option<&mut dyn RandomPort>,
) -> Result<String, MockstreetError> {
    let mut holdings = data.holdings()?;
    if let Some(rng) = refresh {
        holdings = refresh_quotes(&holdings, rng);
    }
    let table_query = query.to_table_query();
    let result = process(&holdings, &table_query, page, page_size)?;
    tracing::debug!(matched = result.total_count, "portfolio view");

    let summary = PortfolioSummary::compute(&holdings);
    let mut lines = vec![format!(
        "Total value: {} | Invested: {} | P/L: {} ({}) | Today: {} ({})",
        format_price(summary.total_value),
        format_price(summary.total_investment),
        format_change(summary.total_profit_loss),
        format_change_percent(summary.total_profit_loss_percent),
        format_change(summary.day_change),
        format_change_percent(summary.day_change_percent),
    )];

    if result.is_empty() {
        lines.push("No holdings match.".to_string());
    } else {
        lines.push(format!(
            "{:<6} {:>5} {:>12} {:>12} {:>12} {:>10} {:>8} {:>8}",
            "SYMBOL", "QTY", "AVG", "PRICE", "VALUE", "P/L", "P/L%", "DAY%"
        ));
        for h in &result.items {
            lines.push(holding_row(h));
        }
    }
    lines.push(pager_line(&result, "holdings"));

    let weights: Vec<String> = allocations(&holdings)
        .iter()
        .map(|a| format!("{} {:.1}%", a.symbol, a.weight_percent))
        .collect();
    if !weights.is_empty() {
        lines.push(format!("Allocation: {}", weights.join(", ")));
    }
    Ok(lines.join("\n") + "\n")
}

fn holding_row(h: &Holding) -> String {
    format!(
        "{:<6} {:>5} {:>12} {:>12} {:>12} {:>10} {:>8} {:>8}",
        h.symbol,
        h.qty,
        format_price(h.avg_price),
        format_price(h.current_price),
        format_price(h.market_value()),
        format_change(h.profit_loss()),
        format_change_percent(h.profit_loss_percent()),
        format_change_percent(h.day_change_percent),
    )
}

/// History view. Summary and export cover every matching record, not just
/// the current page.
pub fn transactions_command(
    data: &dyn MarketDataPort,
    query: &TransactionQuery,
    now: DateTime<Utc>,
    page: usize,
    page_size: usize,
    export: Option<(&dyn ExportPort, &Path)>,
) -> Result<String, MockstreetError> {
    let transactions = data.transactions()?;
    let table_query = query.to_table_query(now);
    let result = process(&transactions, &table_query, page, page_size)?;
    tracing::debug!(matched = result.total_count, "transaction history");

    let matching: Vec<Transaction> = table_query
        .apply(&transactions)
        .into_iter()
        .cloned()
        .collect();

    if let Some((exporter, path)) = export {
        exporter.export_transactions(&matching, path)?;
        eprintln!(
            "Exported {} transactions to: {}",
            matching.len(),
            path.display()
        );
    }

    let summary = TransactionSummary::compute(&matching);
    let mut lines = vec![format!(
        "Bought: {} ({}) | Sold: {} ({}) | Net: {} | Fees: {}",
        format_price(summary.total_buy_amount),
        summary.buy_count,
        format_price(summary.total_sell_amount),
        summary.sell_count,
        format_change(summary.net_flow()),
        format_price(summary.total_fees),
    )];

    if result.is_empty() {
        lines.push("No transactions match.".to_string());
    } else {
        lines.push(format!(
            "{:<8} {:<16} {:<4} {:<6} {:>5} {:>12} {:>12} {:<9}",
            "ID", "DATE", "TYPE", "SYMBOL", "QTY", "PRICE", "TOTAL", "STATUS"
        ));
        for t in &result.items {
            lines.push(format!(
                "{:<8} {:<16} {:<4} {:<6} {:>5} {:>12} {:>12} {:<9}",
                t.trade_id,
                t.trade_date.format("%Y-%m-%d %H:%M").to_string(),
                t.trade_type.as_str(),
                t.symbol,
                t.qty,
                format_price(t.price),
                format_price(t.total_amount),
                t.status.as_str(),
            ));
        }
    }
    lines.push(pager_line(&result, "transactions"));
    Ok(lines.join("\n") + "\n")
}

#[allow(clippy::too_many_arguments)]
pub fn trade_command(
    data: &dyn MarketDataPort,
    symbol: &str,
    side: TradeType,
    quantity: u32,
    price: Option<f64>,
    balance: f64,
    now: DateTime<Utc>,
    rng: &mut dyn RandomPort,
) -> Result<String, MockstreetError> {
    let stock = data.find_stock(symbol)?;
    let ticket = TradeTicket {
        symbol: stock.symbol.clone(),
        side,
        quantity,
        price: price.unwrap_or(stock.last_price),
    };
    let confirmation = execute_trade(&ticket, balance, rng)?;
    let record = confirmation.to_transaction(&ticket, &stock.name, now);
    tracing::debug!(
        trade_id = %record.trade_id,
        total = record.total_amount,
        "trade executed"
    );
    Ok(render_confirmation(&confirmation, &ticket, &record))
}

pub fn render_confirmation(
    confirmation: &TradeConfirmation,
    ticket: &TradeTicket,
    record: &Transaction,
) -> String {
    [
        confirmation.message.clone(),
        format!("Trade ID:  {}", confirmation.trade_id),
        format!("Symbol:    {} ({})", record.symbol, record.name),
        format!(
            "Order:     {} {} @ {}",
            confirmation.side,
            ticket.quantity,
            format_price(ticket.price)
        ),
        format!("Amount:    {}", format_price(confirmation.amount)),
        format!("Balance:   {}", format_price(confirmation.updated_balance)),
        format!(
            "Executed:  {}",
            record.trade_date.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ]
    .join("\n")
        + "\n"
}

/// Summarise the effective settings of a valid config.
pub fn validate_command(config: Option<&dyn ConfigPort>) -> Result<String, MockstreetError> {
    let config = config.ok_or_else(|| {
        MockstreetError::invalid_argument("--config is required for validate")
    })?;
    let settings = build_settings(config)?;
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "mock".to_string());
    let seed = settings
        .seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());

    Ok([
        format!("data source:    {}", source.trim()),
        format!("page size:      {}", settings.page_size),
        format!("chart days:     {}", settings.chart_days),
        format!("volatility:     {}", settings.series.volatility),
        format!("trend strength: {}", settings.series.trend_strength),
        format!("seed:           {seed}"),
        format!("balance:        {}", format_price(settings.balance)),
        "Configuration is valid.".to_string(),
    ]
    .join("\n")
        + "\n")
}
