//! Combined user view.

use anyhow::Result;
use clap::Args;

use super::{AggregateArgs, Stores};
use crate::output;

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(flatten)]
    pub aggregate: AggregateArgs,
}

pub async fn execute(args: UsersArgs, stores: &Stores) -> Result<()> {
    let options = args.aggregate.resolve(stores.aggregate);
    let result = xca_graph::get_all_users(stores.docs.as_ref(), stores.graph.as_ref(), &options).await?;

    if args.aggregate.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_users_table(&result);
    }
    Ok(())
}
