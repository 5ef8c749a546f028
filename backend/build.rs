//! Compile the gRPC contract into Rust types and tonic service stubs.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/country.proto");
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/country.proto"], &["proto"])?;
    Ok(())
}
