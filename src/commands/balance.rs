use truewallet::utils::Table;
use truewallet::{WalletClient, WalletError};

pub async fn execute_balance(client: &WalletClient) -> Result<(), WalletError> {
    let balance = client.get_balance().await?;
    println!("Balance: {}", balance);
    Ok(())
}

pub async fn execute_profile(client: &WalletClient) -> Result<(), WalletError> {
    let profile = client.get_profile().await?;

    let mut table = Table::new(&["Field", "Value"]);
    for (field, value) in [
        ("name", &profile.fullname),
        ("mobile", &profile.mobile_number),
        ("email", &profile.email),
        ("balance", &profile.current_balance),
        ("type", &profile.profile_type),
    ] {
        table.add_row(vec![field.to_string(), value.clone()]);
    }

    print!("{}", table.render());
    Ok(())
}
