use axus_pull::{AxusApi, Config};

fn main() {
    dotenvy::dotenv().ok();
    let config = Config::load().expect("API_CLIENT_ID and API_AUTH_BASIC must be set");
    let mut axus_api = AxusApi::from_config(config);
    println!("axus_api: {:?}", axus_api);

    axus_api.authenticate().expect("Failed to authenticate");

    let token = axus_api.get_token().expect("token after authenticate");
    println!("token: {:?}", token);
}
