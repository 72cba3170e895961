#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    Setup,
    Configurator,
    Results,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Start => "/",
            Route::Setup => "/simulator",
            Route::Configurator => "/calculator",
            Route::Results => "/calculator/result",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
