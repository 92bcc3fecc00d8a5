
use shopdash_client::commands;
use shopdash_client::commands::charts::ChartOptions;
use shopdash_client::commands::dashboard::DashboardOptions;
use shopdash_client::commands::products::{
    ProductAddOptions, ProductListOptions, ProductUpdateOptions,
};
use shopdash_client::commands::purchases::{
    PurchaseAddOptions, PurchaseListOptions, PurchaseRemoveOptions,
};
use shopdash_client::commands::sales::{SaleAddOptions, SaleListOptions, SaleRemoveOptions};
use shopdash_client::commands::salespersons::{
    SalespersonAddOptions, SalespersonListOptions, SalespersonUpdateOptions,
};
use shopdash_client::commands::transfer::{ExportOptions, ImportOptions};
use shopdash_client::records::settings::TargetChanges;
use shopdash_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    ChartCommand, Cli, Commands, ProductCommand, PurchaseCommand, SaleCommand, SalespersonCommand,
    TargetCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let now = cli.now.clone();
    match &cli.command {
        Commands::Dashboard {
            tab,
            month,
            week_start,
        } => commands::dashboard::run_with_options(DashboardOptions {
            tab: tab.clone(),
            month: month.clone(),
            now,
            week_start: week_start.clone(),
            home_override: None,
        }),
        Commands::Chart { command } => {
            let options = match command {
                ChartCommand::Daily(args) => ChartOptions {
                    kind: "daily".to_string(),
                    month: args.month.clone(),
                    ..ChartOptions::default()
                },
                ChartCommand::Categories(args) => ChartOptions {
                    kind: "categories".to_string(),
                    month: args.month.clone(),
                    all: args.all,
                    ..ChartOptions::default()
                },
                ChartCommand::Comparison { view } => ChartOptions {
                    kind: "comparison".to_string(),
                    view: view.clone(),
                    ..ChartOptions::default()
                },
            };
            commands::charts::run_with_options(ChartOptions { now, ..options })
        }
        Commands::Sale { command } => dispatch_sale(command, now),
        Commands::Purchase { command } => dispatch_purchase(command, now),
        Commands::Product { command } => dispatch_product(command),
        Commands::Salesperson { command } => dispatch_salesperson(command),
        Commands::Target { command } => match command {
            TargetCommand::Show => commands::targets::show(),
            TargetCommand::Set {
                daily,
                weekly,
                monthly,
                yearly,
            } => commands::targets::set(TargetChanges {
                daily: *daily,
                weekly: *weekly,
                monthly: *monthly,
                yearly: *yearly,
            }),
        },
        Commands::Export { kind, month, out } => {
            commands::transfer::export_with_options(ExportOptions {
                kind: kind.clone(),
                month: month.clone(),
                out: out.clone(),
                now,
                home_override: None,
            })
        }
        Commands::Import { kind, path, month } => {
            commands::transfer::import_with_options(ImportOptions {
                kind: kind.clone(),
                path: path.clone(),
                month: month.clone(),
                now,
                home_override: None,
                stdin_override: None,
            })
        }
    }
}

fn dispatch_sale(command: &SaleCommand, now: Option<String>) -> ClientResult<SuccessEnvelope> {
    match command {
        SaleCommand::Add {
            product,
            category,
            amount,
            quantity,
            date,
            salesperson,
        } => commands::sales::add_with_options(SaleAddOptions {
            date: date.clone(),
            product: product.clone(),
            category: category.clone(),
            quantity: *quantity,
            amount: *amount,
            salesperson_id: salesperson.clone(),
            now,
            home_override: None,
        }),
        SaleCommand::List(args) => commands::sales::list_with_options(SaleListOptions {
            month: args.month.clone(),
            all: args.all,
            search: args.search.search.clone(),
            now,
            home_override: None,
        }),
        SaleCommand::Remove { id } => commands::sales::remove_with_options(SaleRemoveOptions {
            id: id.clone(),
            home_override: None,
        }),
    }
}

fn dispatch_purchase(
    command: &PurchaseCommand,
    now: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    match command {
        PurchaseCommand::Add {
            product,
            amount,
            date,
        } => commands::purchases::add_with_options(PurchaseAddOptions {
            date: date.clone(),
            product: product.clone(),
            amount: *amount,
            now,
            home_override: None,
        }),
        PurchaseCommand::List(args) => {
            commands::purchases::list_with_options(PurchaseListOptions {
                month: args.month.clone(),
                all: args.all,
                search: args.search.search.clone(),
                now,
                home_override: None,
            })
        }
        PurchaseCommand::Remove { id } => {
            commands::purchases::remove_with_options(PurchaseRemoveOptions {
                id: id.clone(),
                home_override: None,
            })
        }
    }
}

fn dispatch_product(command: &ProductCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        ProductCommand::Add {
            name,
            category,
            price,
            stock,
        } => commands::products::add_with_options(ProductAddOptions {
            name: name.clone(),
            category: category.clone(),
            price: *price,
            stock: stock.clone(),
            home_override: None,
        }),
        ProductCommand::List(args) => commands::products::list_with_options(ProductListOptions {
            search: args.search.clone(),
            home_override: None,
        }),
        ProductCommand::Update {
            id,
            name,
            category,
            price,
            stock,
        } => commands::products::update_with_options(ProductUpdateOptions {
            id: id.clone(),
            name: name.clone(),
            category: category.clone(),
            price: *price,
            stock: stock.clone(),
            home_override: None,
        }),
        ProductCommand::Remove { id } => commands::products::remove_with_home_override(id, None),
    }
}

fn dispatch_salesperson(command: &SalespersonCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        SalespersonCommand::Add {
            name,
            email,
            phone,
            inactive,
        } => commands::salespersons::add_with_options(SalespersonAddOptions {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
            inactive: *inactive,
            home_override: None,
        }),
        SalespersonCommand::List(args) => {
            commands::salespersons::list_with_options(SalespersonListOptions {
                search: args.search.clone(),
                home_override: None,
            })
        }
        SalespersonCommand::Update {
            id,
            name,
            email,
            phone,
            active,
            inactive,
        } => commands::salespersons::update_with_options(SalespersonUpdateOptions {
            id: id.clone(),
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
            active: active_flag(*active, *inactive),
            home_override: None,
        }),
        SalespersonCommand::Remove { id } => {
            commands::salespersons::remove_with_home_override(id, None)
        }
    }
}

fn active_flag(active: bool, inactive: bool) -> Option<bool> {
    match (active, inactive) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
