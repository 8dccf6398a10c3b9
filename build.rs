use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Falls back to idempotent output when building outside of a git checkout.
  EmitBuilder::builder().all_build().all_git().emit()?;
  Ok(())
}
