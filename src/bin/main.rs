use dbip::config::parse_config;
use dbip::{AddressQuery, Error};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "dbip.toml".to_owned());
    let addresses: AddressQuery = args.collect();

    let config = parse_config(&config_path)?;
    simple_logger::init_with_level(config.log_level)?;
    let client = config.client();

    let result = if addresses.is_empty() {
        client.key_info()
    } else {
        client.lookup_address(addresses)
    };

    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(Error::Server(e)) => {
            let code = e.code().map(|code| code.as_str()).unwrap_or("-");
            Err(anyhow::anyhow!("{} [{}]", e, code))
        }
        Err(e) => Err(e.into()),
    }
}
