//! # kafe
//!
//! Command-line front end for the café ordering client. Each subcommand opens
//! the screen behind the flow, performs it and prints the resulting notices.
//!
//! ```bash
//! kafe login alice secret
//! kafe menu --query kopi
//! kafe order 64f0c2 64f0c2 64f0d9
//! kafe watch-orders
//! ```

use clap::{Parser, Subcommand};
use kafe_client::api::HttpBackend;
use kafe_client::config::Config;
use kafe_client::lifecycle::{setup_tracing, App};
use kafe_client::model::{MenuForm, MenuId, MenuItem, Order};
use kafe_client::notify::{drain, NoticeReceiver};
use kafe_client::screens::OrdersState;
use kafe_client::session::FileSessionStore;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    /// List the menu, optionally filtered by name or price.
    Menu {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Order the given menu items. Repeat an id to order it more than once.
    Order {
        #[arg(required = true)]
        items: Vec<String>,
    },
    Orders,
    /// Print the order list every time it changes, until Ctrl-C.
    WatchOrders,
    Profile,
    MenuAdd {
        name: String,
        price: String,
    },
    MenuEdit {
        id: String,
        name: String,
        price: String,
    },
    MenuDelete {
        id: String,
    },
}

const NOT_SIGNED_IN: &str = "Not logged in. Run `kafe login` first.";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout())
        .map_err(|e| e.to_string())?;
    let store = FileSessionStore::new(config.session_path.clone());

    let (mut app, mut notices) = App::start(config, Arc::new(backend), Arc::new(store)).await;

    let span = info_span!("command");
    let result = run(&mut app, &mut notices, args.command)
        .instrument(span)
        .await;

    print_notices(&mut notices);
    result
}

async fn run(app: &mut App, notices: &mut NoticeReceiver, command: Command) -> Result<(), String> {
    match command {
        Command::Login { username, password } => app
            .login(&username, &password)
            .await
            .map_err(|e| e.to_string()),
        Command::Register {
            username,
            email,
            password,
        } => app
            .register(&username, &email, &password)
            .await
            .map_err(|e| e.to_string()),
        Command::Logout => app.logout().await.map_err(|e| e.to_string()),
        Command::Menu { query } => {
            let mut screen = app.open_menu_admin().await.ok_or(NOT_SIGNED_IN)?;
            screen.search(query);
            for item in screen.visible() {
                print_item(item);
            }
            Ok(())
        }
        Command::Order { items } => {
            let mut home = app.open_home().await.ok_or(NOT_SIGNED_IN)?;
            let menu = match home.refresh_menu().await {
                Ok(menu) => menu,
                Err(e) => {
                    home.close().await?;
                    return Err(e.to_string());
                }
            };

            for id in items.into_iter().map(MenuId::from) {
                let Some(item) = menu.iter().find(|item| item.id == id) else {
                    home.close().await?;
                    return Err(format!("No menu item with id {id}"));
                };
                home.add(item);
            }
            info!(lines = home.cart().len(), total = %home.total(), "Cart ready");

            let submitted = home.submit_order().await;
            home.close().await?;
            submitted.map(|_| ()).map_err(|e| e.to_string())
        }
        Command::Orders => {
            let screen = app.open_orders().await.ok_or(NOT_SIGNED_IN)?;
            let mut updates = screen.updates();
            let state = updates
                .wait_for(|state| *state != OrdersState::Loading)
                .await
                .map_err(|e| e.to_string())?
                .clone();
            for order in state.orders() {
                print_order(order);
            }
            screen.close().await
        }
        Command::WatchOrders => {
            let screen = app.open_orders().await.ok_or(NOT_SIGNED_IN)?;
            let mut updates = screen.updates();
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        changed.map_err(|e| e.to_string())?;
                        print_notices(notices);
                        let state = updates.borrow_and_update().clone();
                        println!("--- {} order(s)", state.orders().len());
                        for order in state.orders() {
                            print_order(order);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            screen.close().await
        }
        Command::Profile => {
            let screen = app.open_profile().await.ok_or(NOT_SIGNED_IN)?;
            let profile = screen.profile().ok_or("Failed to load profile")?;
            println!("{}", profile.username);
            println!("{}", profile.email);
            println!("member since {}", profile.created_at.format("%Y-%m-%d"));
            println!("avatar {}", profile.avatar_url());
            Ok(())
        }
        Command::MenuAdd { name, price } => {
            let mut screen = app.open_menu_admin().await.ok_or(NOT_SIGNED_IN)?;
            let item = screen
                .add(&MenuForm::new(name, price))
                .await
                .map_err(|e| e.to_string())?;
            print_item(&item);
            Ok(())
        }
        Command::MenuEdit { id, name, price } => {
            let mut screen = app.open_menu_admin().await.ok_or(NOT_SIGNED_IN)?;
            let item = screen
                .edit(&MenuId::from(id), &MenuForm::new(name, price))
                .await
                .map_err(|e| e.to_string())?;
            print_item(&item);
            Ok(())
        }
        Command::MenuDelete { id } => {
            let mut screen = app.open_menu_admin().await.ok_or(NOT_SIGNED_IN)?;
            screen
                .delete(&MenuId::from(id))
                .await
                .map_err(|e| e.to_string())
        }
    }
}

fn print_item(item: &MenuItem) {
    println!("{:<26} {:<24} Rp {}", item.id, item.name, item.price.grouped());
}

fn print_order(order: &Order) {
    println!("Order #{}  Rp {}", order.order_number, order.total_amount.grouped());
    for line in &order.items {
        println!("  {} x{}  Rp {}", line.name, line.quantity, line.total_price.grouped());
    }
}

fn print_notices(notices: &mut NoticeReceiver) {
    for notice in drain(notices) {
        if notice.is_error() {
            eprintln!("{}", notice.message);
        } else {
            println!("{}", notice.message);
        }
    }
}
