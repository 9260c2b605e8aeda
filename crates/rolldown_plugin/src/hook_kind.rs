/// How the driver calls the plugins listening to a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
  /// All listeners are started at once and awaited together.
  Parallel,
  /// Listeners run one after another, in registration order.
  Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookKind {
  RenderStart,
  Banner,
  Footer,
  Intro,
  Outro,
  RenderChunk,
  RenderError,
  GenerateBundle,
}

impl HookKind {
  pub const ALL: [HookKind; 8] = [
    HookKind::RenderStart,
    HookKind::Banner,
    HookKind::Footer,
    HookKind::Intro,
    HookKind::Outro,
    HookKind::RenderChunk,
    HookKind::RenderError,
    HookKind::GenerateBundle,
  ];

  pub const ADDONS: [HookKind; 4] = [
    HookKind::Banner,
    HookKind::Footer,
    HookKind::Intro,
    HookKind::Outro,
  ];

  pub fn dispatch_mode(self) -> DispatchMode {
    match self {
      HookKind::RenderStart | HookKind::RenderError => DispatchMode::Parallel,
      HookKind::Banner
      | HookKind::Footer
      | HookKind::Intro
      | HookKind::Outro
      | HookKind::RenderChunk
      | HookKind::GenerateBundle => DispatchMode::Sequential,
    }
  }

  pub fn is_addon(self) -> bool {
    Self::ADDONS.contains(&self)
  }

  /// Name of the hook as plugin authors know it.
  pub fn as_str(self) -> &'static str {
    match self {
      HookKind::RenderStart => "renderStart",
      HookKind::Banner => "banner",
      HookKind::Footer => "footer",
      HookKind::Intro => "intro",
      HookKind::Outro => "outro",
      HookKind::RenderChunk => "renderChunk",
      HookKind::RenderError => "renderError",
      HookKind::GenerateBundle => "generateBundle",
    }
  }
}

impl std::fmt::Display for HookKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
