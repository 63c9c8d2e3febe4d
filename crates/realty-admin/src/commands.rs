//! Command execution

use anyhow::bail;
use realty_client::{
    ApiClient, MarketplaceClient,
    constants::api_path,
    model::{Category, Listing, Review, Slider, User, build_category_tree},
};
use realty_table::{LoadState, ParamKeys, ReorderConfig, TableConfig, TableController, TableRow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::{
    cli::{
        CategoryCommand, Command, ListArgs, ListCommand, ReorderArgs, SortableCommand, TreeArgs,
    },
    output::{DisplayRow, render_dashboard, render_pages, render_table, render_tree},
};

/// Table-backed resources
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Listings,
    Categories,
    Users,
    Sliders,
    Reviews,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Listings => "listings",
            Resource::Categories => "categories",
            Resource::Users => "users",
            Resource::Sliders => "sliders",
            Resource::Reviews => "reviews",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Resource::Listings => api_path::LISTINGS,
            Resource::Categories => api_path::CATEGORIES,
            Resource::Users => api_path::USERS,
            Resource::Sliders => api_path::SLIDERS,
            Resource::Reviews => api_path::REVIEWS,
        }
    }

    pub fn filter_keys(&self) -> &'static [&'static str] {
        match self {
            Resource::Listings => &["status", "category_id", "user_id", "currency"],
            Resource::Categories => &["parent_id"],
            Resource::Users => &["role", "is_active"],
            Resource::Sliders => &["is_active"],
            Resource::Reviews => &["listing_id", "user_id", "rating", "is_approved"],
        }
    }

    pub fn reorder_endpoint(&self) -> Option<&'static str> {
        match self {
            Resource::Listings => Some(api_path::LISTINGS_REORDER),
            Resource::Categories => Some(api_path::CATEGORIES_REORDER),
            Resource::Sliders => Some(api_path::SLIDERS_REORDER),
            Resource::Users | Resource::Reviews => None,
        }
    }

    pub fn table_config(&self, args: &ListArgs) -> TableConfig {
        let keys = if args.legacy_sort_keys {
            ParamKeys::legacy()
        } else {
            ParamKeys::default()
        };

        let mut config = self
            .filter_keys()
            .iter()
            .fold(TableConfig::new(self.endpoint()), |config, key| {
                config.filter_key(key)
            })
            .keys(keys);
        if let Some(endpoint) = self.reorder_endpoint() {
            config = config.reorder(ReorderConfig::new(endpoint));
        }
        config
    }
}

pub async fn run(command: Command, client: ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Listings(cmd) => sortable::<Listing>(client, Resource::Listings, cmd).await,
        Command::Sliders(cmd) => sortable::<Slider>(client, Resource::Sliders, cmd).await,
        Command::Categories(CategoryCommand::List(args)) => {
            list::<Category>(client, Resource::Categories, &args).await
        }
        Command::Categories(CategoryCommand::Reorder(args)) => {
            reorder::<Category>(client, Resource::Categories, &args).await
        }
        Command::Categories(CategoryCommand::Tree(args)) => tree(client, &args).await,
        Command::Users(ListCommand::List(args)) => {
            list::<User>(client, Resource::Users, &args).await
        }
        Command::Reviews(ListCommand::List(args)) => {
            list::<Review>(client, Resource::Reviews, &args).await
        }
        Command::Dashboard => dashboard(client).await,
    }
}

async fn sortable<R>(
    client: ApiClient,
    resource: Resource,
    command: SortableCommand,
) -> anyhow::Result<()>
where
    R: TableRow + DisplayRow + DeserializeOwned + Clone,
{
    match command {
        SortableCommand::List(args) => list::<R>(client, resource, &args).await,
        SortableCommand::Reorder(args) => reorder::<R>(client, resource, &args).await,
    }
}

/// Apply CLI arguments the way a user would click through the table
pub fn apply_args<R>(table: &mut TableController<R>, args: &ListArgs) -> anyhow::Result<()>
where
    R: TableRow + DeserializeOwned + Clone,
{
    if let Some(search) = &args.search {
        table.set_search(search);
    }
    for (key, value) in &args.filters {
        table.set_filter(key, value)?;
    }
    if args.from.is_some() || args.to.is_some() {
        table.set_date_range(args.from, args.to);
    }
    for column in &args.sort {
        table.toggle_sort(column);
    }
    if let Some(page) = args.page {
        table.set_page(page);
    }
    Ok(())
}

async fn load<R>(
    client: ApiClient,
    resource: Resource,
    args: &ListArgs,
) -> anyhow::Result<TableController<R>>
where
    R: TableRow + DeserializeOwned + Clone,
{
    let mut table = TableController::new(client, resource.table_config(args));
    apply_args(&mut table, args)?;

    if let LoadState::Error(message) = table.fetch().await {
        bail!("Failed to load {}: {}", resource.name(), message);
    }
    Ok(table)
}

fn print_table<R>(table: &TableController<R>)
where
    R: TableRow + DisplayRow + DeserializeOwned + Clone,
{
    println!("{}", render_table(table.rows()));
    if let Some(meta) = table.meta() {
        println!("{}", render_pages(meta, &table.pages()));
    }
}

async fn list<R>(client: ApiClient, resource: Resource, args: &ListArgs) -> anyhow::Result<()>
where
    R: TableRow + DisplayRow + DeserializeOwned + Clone,
{
    let table = load::<R>(client, resource, args).await?;
    print_table(&table);
    Ok(())
}

async fn reorder<R>(
    client: ApiClient,
    resource: Resource,
    args: &ReorderArgs,
) -> anyhow::Result<()>
where
    R: TableRow + DisplayRow + DeserializeOwned + Clone,
{
    let mut table = load::<R>(client, resource, &args.list).await?;
    table.reorder(args.from, args.to).await?;

    info!("Moved {} row {} to {}", resource.name(), args.from, args.to);
    print_table(&table);
    Ok(())
}

async fn tree(client: ApiClient, args: &TreeArgs) -> anyhow::Result<()> {
    let marketplace = MarketplaceClient::new(client);
    let nodes = if args.from_list {
        let categories = marketplace.list_categories(&[]).await.into_result()?;
        build_category_tree(categories)
    } else {
        marketplace.category_tree().await.into_result()?
    };

    print!("{}", render_tree(&nodes));
    Ok(())
}

async fn dashboard(client: ApiClient) -> anyhow::Result<()> {
    let stats = MarketplaceClient::new(client)
        .dashboard_stats()
        .await
        .into_result()?;

    println!("{}", render_dashboard(&stats));
    if !stats.extra.is_empty() {
        println!("{}", serde_json::to_string_pretty(&Value::Object(stats.extra))?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use realty_client::ClientConfig;

    fn table(resource: Resource, args: &ListArgs) -> TableController<Value> {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:8000/api")).unwrap();
        TableController::new(client, resource.table_config(args))
    }

    #[test]
    fn test_apply_args_builds_query() {
        let args = ListArgs {
            search: Some("garden".to_string()),
            filters: vec![("status".to_string(), "published".to_string())],
            sort: vec!["price".to_string(), "price".to_string()],
            page: Some(3),
            from: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        let mut table = table(Resource::Listings, &args);
        apply_args(&mut table, &args).unwrap();

        assert_eq!(
            table.query().to_query_string(),
            "dateFrom=2024-05-01&page=3&search=garden&sort_field=price&sort_order=desc&status=published"
        );
    }

    #[test]
    fn test_unknown_filter_is_an_error() {
        let args = ListArgs {
            filters: vec![("status".to_string(), "x".to_string())],
            ..Default::default()
        };
        let mut table = table(Resource::Users, &args);
        let err = apply_args(&mut table, &args).unwrap_err();
        assert_eq!(err.to_string(), "Unknown filter: status");
    }

    #[test]
    fn test_reorder_support_per_resource() {
        let args = ListArgs::default();
        assert!(Resource::Sliders.table_config(&args).reorder.is_some());
        assert!(Resource::Reviews.table_config(&args).reorder.is_none());

        let legacy = ListArgs {
            legacy_sort_keys: true,
            ..Default::default()
        };
        assert_eq!(
            Resource::Categories.table_config(&legacy).keys,
            ParamKeys::legacy()
        );
    }
}
