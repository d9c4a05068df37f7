use std::path::PathBuf;

use clap::Parser;

use tax_agent_report::{convert_file, ReportMapping, ReportRenderer};

#[derive(Parser, Debug)]
#[command(
    name = "tax-agent-report",
    version,
    about = "Конвертация JSON в текстовый отчёт с тем же именем файла"
)]
struct Cli {
    #[arg(required = true, help = "Пути к JSON файлам")]
    files: Vec<PathBuf>,

    #[arg(long, help = "JSON файл с правилами маппинга вместо встроенных")]
    mapping: Option<PathBuf>,

    #[arg(long, help = "Множитель для правил с множителем (по умолчанию ПН)")]
    pn_multiplier: Option<f64>,

    #[arg(short, long, help = "Подробный вывод логов")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut mapping = match &cli.mapping {
        Some(path) => ReportMapping::from_file(path)?,
        None => ReportMapping::default(),
    };
    if let Some(multiplier) = cli.pn_multiplier {
        mapping.override_multiplier(multiplier);
    }
    let renderer = ReportRenderer::new(mapping);

    for file in &cli.files {
        if !file.exists() {
            println!("Файл не найден: {}", file.display());
            continue;
        }
        match convert_file(file, &renderer) {
            Ok(output) => println!("Готово: {}", output.display()),
            Err(e) => println!("Ошибка: {e}"),
        }
    }

    Ok(())
}
