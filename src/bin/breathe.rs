extern crate anyhow;
extern crate env_logger;
extern crate glitter;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = glitter::Config::default();
    glitter::run(glitter::Scene::Breathe, &config)
        .map_err(|err| anyhow::anyhow!("breathe scene failed: {}", err))
}
