fn main() -> anyhow::Result<()> {
    pipe_forge_app::main()
}
