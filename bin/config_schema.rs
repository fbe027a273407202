//! Prints the JSON schema of the `odoo-ops` config file

use odoo_graphql_runtime::Config;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
