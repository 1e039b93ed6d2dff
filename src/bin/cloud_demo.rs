#![cfg(not(tarpaulin_include))]

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Generate example clouds from the library - returns file paths
    let clouds = profile_cloud::cloud::create_example_clouds("cloud_output");

    for (name, file_path) in clouds {
        println!("Created {} cloud at {}", name, file_path);
    }

    Ok(())
}
