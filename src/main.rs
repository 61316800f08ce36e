fn main() -> anyhow::Result<()> {
    athletex_lib::run()
}
