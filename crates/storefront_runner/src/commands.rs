use anyhow::Result;
use base::helpers::format_amount;
use base::notifier::{NotificationLevel, Notifier};
use base::storage::LocalStorage;
use cart::{CartStore, LineKey, NewCartItem};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use storefront_api::booking::{available_dates, bookable_slots, DEFAULT_BOOKING_HORIZON_DAYS};
use storefront_api::entities::{BookingSelection, PaymentMethod, RegisterRequest};
use storefront_api::helpers::{format_date, format_time, parse_date, parse_time};
use storefront_api::{
    checkout, complete_redirected_checkout, AuthApi, CheckoutApi, CheckoutOutcome, StorefrontApi,
    ValidationError,
};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse a tenant's storefront and manage the cart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tenant branding and enabled features
    Config,
    /// List the products
    Products,
    /// List the services
    Services,
    /// List the dates a service can be booked on
    Dates { service_id: String },
    /// List the free slots of a service on a date
    Slots {
        service_id: String,
        #[arg(long, value_parser = date_arg)]
        date: NaiveDate,
    },
    /// Show the cart
    Cart,
    /// Add a product, or a service with `--service`, to the cart
    Add {
        item_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        service: bool,
        #[arg(long, value_parser = date_arg, requires = "time")]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = time_arg, requires = "date")]
        time: Option<NaiveTime>,
    },
    /// Set the quantity of a cart line; zero or less removes it
    Update {
        item_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long, value_parser = date_arg, requires = "time")]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = time_arg, requires = "date")]
        time: Option<NaiveTime>,
    },
    /// Remove a cart line
    Remove {
        item_id: String,
        #[arg(long, value_parser = date_arg, requires = "time")]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = time_arg, requires = "date")]
        time: Option<NaiveTime>,
    },
    /// Empty the cart
    Clear,
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
        #[arg(long)]
        phone: Option<String>,
    },
    Logout,
    /// Show the logged in user
    Me,
    /// Place an order for the cart
    Checkout {
        #[arg(long, default_value = "MERCADO_PAGO")]
        method: PaymentMethod,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Clear the cart after paying on the payment provider's page
    Paid,
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time(value).map_err(|e| e.to_string())
}

fn line_key(item_id: &str, date: Option<NaiveDate>, time: Option<NaiveTime>) -> LineKey {
    match (date, time) {
        (Some(date), Some(time)) => {
            LineKey::booking(item_id, &format_date(date), &format_time(time))
        }
        _ => LineKey::item(item_id),
    }
}

pub fn run<S, A, N>(command: Command, cart: &mut CartStore<'_, S>, api: &A, notifier: &N) -> Result<()>
where
    S: LocalStorage,
    A: StorefrontApi + AuthApi + CheckoutApi,
    N: Notifier,
{
    match command {
        Command::Config => {
            let config = api.get_current_config()?;

            println!("{} ({})", config.business_name, config.subdomain);
            if let Some(business_type) = &config.business_type {
                println!("type: {}", business_type);
            }
            if !config.config.categories.is_empty() {
                println!("categories: {}", config.config.categories.join(", "));
            }

            let mut features: Vec<_> = config
                .config
                .features
                .keys()
                .filter(|feature| config.config.is_feature_enabled(feature))
                .collect();
            features.sort();
            println!(
                "features: {}",
                features
                    .iter()
                    .map(|feature| feature.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Command::Products => {
            for product in api.get_products()?.iter().filter(|p| p.active) {
                let stock = product
                    .stock
                    .map_or_else(|| String::from("-"), |stock| stock.to_string());

                println!(
                    "{}\t{}\t${}\tstock: {}",
                    product.id,
                    product.name,
                    format_amount(product.price),
                    stock
                );
            }
        }
        Command::Services => {
            for service in api.get_services()?.iter().filter(|s| s.active) {
                println!(
                    "{}\t{}\t${}\t{}",
                    service.id,
                    service.name,
                    format_amount(service.price),
                    service.available_days.join(",")
                );
            }
        }
        Command::Dates { service_id } => {
            let service = api.get_service(&service_id)?;
            let today = Local::now().date_naive();

            for date in available_dates(&service, today, DEFAULT_BOOKING_HORIZON_DAYS) {
                println!("{}", format_date(date));
            }
        }
        Command::Slots { service_id, date } => {
            let slots = api.get_available_slots(&service_id, date)?;
            let bookable = bookable_slots(&slots);

            if bookable.is_empty() {
                notifier.send_message(
                    NotificationLevel::Info,
                    &format!("there are no free slots on {}", format_date(date)),
                )?;
            }

            for slot in bookable {
                println!(
                    "{}\t{}/{} free",
                    format_time(slot.start_time),
                    slot.available_spots,
                    slot.total_capacity
                );
            }
        }
        Command::Cart => print_cart(cart),
        Command::Add {
            item_id,
            quantity,
            service,
            date,
            time,
        } => {
            let item = if service {
                service_cart_item(api, &item_id, date, time)?
            } else {
                api.get_product(&item_id)?.to_cart_item()
            };

            if let Some(warning) = cart.add_to_cart(item, quantity)? {
                notifier.send_message(NotificationLevel::Warning, &warning.to_string())?;
            }

            print_cart(cart);
        }
        Command::Update {
            item_id,
            quantity,
            date,
            time,
        } => {
            let key = line_key(&item_id, date, time);

            if let Some(warning) = cart.update_quantity(&key, quantity)? {
                notifier.send_message(NotificationLevel::Warning, &warning.to_string())?;
            }

            print_cart(cart);
        }
        Command::Remove {
            item_id,
            date,
            time,
        } => {
            cart.remove_from_cart(&line_key(&item_id, date, time))?;
            print_cart(cart);
        }
        Command::Clear => cart.clear_cart()?,
        Command::Login { email, password } => {
            api.login(&email, &password)?;
            let user = api.get_current_user()?;

            notifier.send_message(
                NotificationLevel::Success,
                &format!("welcome, {}", user.name),
            )?;
        }
        Command::Register {
            name,
            email,
            password,
            phone,
        } => {
            let user = api.register(&RegisterRequest {
                name,
                email,
                phone,
                password,
            })?;

            notifier.send_message(
                NotificationLevel::Success,
                &format!("the account of {} is created, you can log in now", user.email),
            )?;
        }
        Command::Logout => api.logout()?,
        Command::Me => {
            let user = api.get_current_user()?;

            println!("{} <{}>", user.name, user.email);
            if let Some(tenant_name) = &user.tenant_name {
                println!("tenant: {}", tenant_name);
            }
        }
        Command::Checkout { method, notes } => {
            match checkout(cart, api, notifier, method, notes)? {
                CheckoutOutcome::Completed { order, .. } => {
                    println!("order {} is placed", order.id);
                }
                CheckoutOutcome::RedirectToPayment {
                    order,
                    payment_link,
                    ..
                } => {
                    println!("order {} awaits payment: {}", order.id, payment_link);
                    println!("run `storefront paid` once the payment is done");
                }
            }
        }
        Command::Paid => complete_redirected_checkout(cart)?,
    }

    Ok(())
}

fn service_cart_item<A: StorefrontApi>(
    api: &A,
    service_id: &str,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Result<NewCartItem> {
    let service = api.get_service(service_id)?;

    let date = match date {
        Some(date) => date,
        None if service.requires_booking => {
            return Err(ValidationError::MissingBookingSelection.into())
        }
        None => return Ok(service.to_cart_item()),
    };

    let slots = api.get_available_slots(service_id, date)?;
    let slot = slots.iter().find(|slot| Some(slot.start_time) == time);
    let selection = BookingSelection::new(Some(date), slot)?;

    Ok(service.to_booked_cart_item(&selection))
}

fn print_cart<S: LocalStorage>(cart: &CartStore<'_, S>) {
    if cart.is_empty() {
        println!("the cart is empty");
        return;
    }

    for line in cart.lines() {
        let booking = match (&line.booking_date, &line.booking_time) {
            (Some(date), Some(time)) => format!(" ({} {})", date, time),
            _ => String::new(),
        };

        println!(
            "{}{}\t{} x{}\t${}",
            line.id,
            booking,
            line.name,
            line.quantity,
            format_amount(line.subtotal())
        );
    }

    println!(
        "items: {}\ttotal: ${}",
        cart.total_items(),
        format_amount(cart.total())
    );
}
