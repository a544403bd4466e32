use asc::Application;

fn main() {
    std::process::exit(Application::new().run());
}
