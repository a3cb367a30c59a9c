/*
 * Recording fakes for the collaborator traits and the interceptor host.
 * Shared by the unit tests of the hook, chrome and interceptor modules.
 */

use crate::chrome::ChromeCustomizer;
use crate::interceptor::{DrawingSurface, MenuHost};
use crate::lifecycle_hook::{HookServices, LifecycleHook};
use crate::styling_primitives::ColorRef;
use crate::types::{
    AppearanceState, BarGeometry, ChromeFeature, CloseAnimation, CornerStyle,
    InterceptorInstaller, MenuClassifier, MenuHandle, MenuItemDescriptor, MenuRegistry, Point,
    Rect, WindowHandle, WindowMessage, WindowValidator,
};

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const WINDOW_RECT: Rect = Rect {
    left: 0,
    top: 0,
    right: 160,
    bottom: 240,
};

const DARK_BORDER: ColorRef = ColorRef(0x0020_2020);
const LIGHT_BORDER: ColorRef = ColorRef(0x00E0_E0E0);

#[derive(Debug)]
struct AppearanceFlags {
    transparency: bool,
    newer_generation: bool,
    dark_mode: bool,
    disabled_features: HashSet<ChromeFeature>,
}

#[derive(Debug)]
pub(crate) struct FakeAppearance {
    flags: Mutex<AppearanceFlags>,
    transparency_reads: AtomicUsize,
}

impl FakeAppearance {
    fn with_generation(newer_generation: bool) -> Self {
        Self {
            flags: Mutex::new(AppearanceFlags {
                transparency: true,
                newer_generation,
                dark_mode: false,
                disabled_features: HashSet::new(),
            }),
            transparency_reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn newer() -> Self {
        Self::with_generation(true)
    }

    pub(crate) fn older() -> Self {
        Self::with_generation(false)
    }

    pub(crate) fn set_transparency(&self, enabled: bool) {
        self.flags.lock().unwrap().transparency = enabled;
    }

    pub(crate) fn transparency_reads(&self) -> usize {
        self.transparency_reads.load(Ordering::SeqCst)
    }

    pub(crate) fn set_newer_generation(&self, newer: bool) {
        self.flags.lock().unwrap().newer_generation = newer;
    }

    pub(crate) fn set_dark_mode(&self, dark: bool) {
        self.flags.lock().unwrap().dark_mode = dark;
    }

    pub(crate) fn set_feature(&self, feature: ChromeFeature, enabled: bool) {
        let mut flags = self.flags.lock().unwrap();
        if enabled {
            flags.disabled_features.remove(&feature);
        } else {
            flags.disabled_features.insert(feature);
        }
    }
}

impl AppearanceState for FakeAppearance {
    fn transparency_enabled(&self) -> bool {
        self.transparency_reads.fetch_add(1, Ordering::SeqCst);
        self.flags.lock().unwrap().transparency
    }

    fn host_generation_is_newer(&self) -> bool {
        self.flags.lock().unwrap().newer_generation
    }

    fn dark_mode_active(&self) -> bool {
        self.flags.lock().unwrap().dark_mode
    }

    fn feature_enabled(&self, feature: ChromeFeature) -> bool {
        !self.flags.lock().unwrap().disabled_features.contains(&feature)
    }

    fn border_color(&self, dark_mode: bool) -> ColorRef {
        if dark_mode { DARK_BORDER } else { LIGHT_BORDER }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeClassifier {
    themed: Mutex<HashSet<WindowHandle>>,
}

impl FakeClassifier {
    pub(crate) fn mark_themed(&self, windows: &[WindowHandle]) {
        self.themed.lock().unwrap().extend(windows.iter().copied());
    }
}

impl MenuClassifier for FakeClassifier {
    fn is_themed_popup_menu(&self, window: WindowHandle) -> bool {
        self.themed.lock().unwrap().contains(&window)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeValidator {
    dead: Mutex<HashSet<WindowHandle>>,
}

impl FakeValidator {
    pub(crate) fn mark_dead(&self, window: WindowHandle) {
        self.dead.lock().unwrap().insert(window);
    }
}

impl WindowValidator for FakeValidator {
    fn is_window(&self, window: WindowHandle) -> bool {
        !self.dead.lock().unwrap().contains(&window)
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRegistry {
    calls: Mutex<Vec<Option<WindowHandle>>>,
}

impl RecordingRegistry {
    pub(crate) fn calls(&self) -> Vec<Option<WindowHandle>> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count_of(&self, value: Option<WindowHandle>) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == value)
            .count()
    }
}

impl MenuRegistry for RecordingRegistry {
    fn set_current_menu(&self, menu: Option<WindowHandle>) {
        self.calls.lock().unwrap().push(menu);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingInstaller {
    installed: Mutex<Vec<WindowHandle>>,
    fail_next: AtomicBool,
}

impl RecordingInstaller {
    pub(crate) fn installed(&self) -> Vec<WindowHandle> {
        self.installed.lock().unwrap().clone()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl InterceptorInstaller for RecordingInstaller {
    fn install(&self, window: WindowHandle) -> bool {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.installed.lock().unwrap().push(window);
        true
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingChrome {
    corners: Mutex<Vec<(WindowHandle, CornerStyle)>>,
    borders: Mutex<Vec<(WindowHandle, ColorRef)>>,
}

impl RecordingChrome {
    pub(crate) fn corner_calls(&self) -> Vec<(WindowHandle, CornerStyle)> {
        self.corners.lock().unwrap().clone()
    }

    pub(crate) fn border_calls(&self) -> Vec<(WindowHandle, ColorRef)> {
        self.borders.lock().unwrap().clone()
    }
}

impl ChromeCustomizer for RecordingChrome {
    fn apply_corner_style(&self, window: WindowHandle, style: CornerStyle) {
        self.corners.lock().unwrap().push((window, style));
    }

    fn apply_border_color(&self, window: WindowHandle, color: ColorRef) {
        self.borders.lock().unwrap().push((window, color));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAnimation {
    calls: Mutex<Vec<BarGeometry>>,
}

impl RecordingAnimation {
    pub(crate) fn calls(&self) -> Vec<BarGeometry> {
        self.calls.lock().unwrap().clone()
    }
}

impl CloseAnimation for RecordingAnimation {
    fn begin_close_animation(&self, geometry: &BarGeometry) {
        self.calls.lock().unwrap().push(*geometry);
    }
}

/// Every fake shared by one hook, kept so tests can inspect them.
pub(crate) struct TestRig {
    pub(crate) appearance: Arc<FakeAppearance>,
    pub(crate) classifier: Arc<FakeClassifier>,
    pub(crate) validator: Arc<FakeValidator>,
    pub(crate) registry: Arc<RecordingRegistry>,
    pub(crate) installer: Arc<RecordingInstaller>,
    pub(crate) chrome: Arc<RecordingChrome>,
}

impl TestRig {
    pub(crate) fn new() -> Self {
        Self {
            appearance: Arc::new(FakeAppearance::newer()),
            classifier: Arc::new(FakeClassifier::default()),
            validator: Arc::new(FakeValidator::default()),
            registry: Arc::new(RecordingRegistry::default()),
            installer: Arc::new(RecordingInstaller::default()),
            chrome: Arc::new(RecordingChrome::default()),
        }
    }

    pub(crate) fn services(&self) -> HookServices {
        HookServices {
            appearance: self.appearance.clone(),
            classifier: self.classifier.clone(),
            validator: self.validator.clone(),
            registry: self.registry.clone(),
            installer: self.installer.clone(),
            chrome: self.chrome.clone(),
        }
    }

    pub(crate) fn hook(&self) -> LifecycleHook {
        LifecycleHook::new(self.services())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SurfaceLog {
    pub(crate) depth: i32,
    pub(crate) max_depth: i32,
    pub(crate) origin: Point,
    pub(crate) clip: Rect,
    pub(crate) fills: Vec<Rect>,
    pub(crate) selected_region: Option<usize>,
    pub(crate) released: usize,
    pub(crate) origin_at_forward: Vec<Point>,
    saved_origins: Vec<Point>,
    regions: HashMap<usize, Rect>,
}

impl Default for SurfaceLog {
    fn default() -> Self {
        Self {
            depth: 0,
            max_depth: 0,
            origin: Point::default(),
            clip: WINDOW_RECT,
            fills: Vec::new(),
            selected_region: None,
            released: 0,
            origin_at_forward: Vec::new(),
            saved_origins: Vec::new(),
            regions: HashMap::new(),
        }
    }
}

pub(crate) struct FakeSurface {
    log: Rc<RefCell<SurfaceLog>>,
    owned: bool,
}

impl DrawingSurface for FakeSurface {
    fn save_state(&mut self) -> Option<i32> {
        let mut log = self.log.borrow_mut();
        let origin = log.origin;
        log.saved_origins.push(origin);
        log.depth += 1;
        log.max_depth = log.max_depth.max(log.depth);
        Some(log.depth)
    }

    fn restore_state(&mut self, saved: i32) {
        let mut log = self.log.borrow_mut();
        while log.depth >= saved && log.depth > 0 {
            if let Some(origin) = log.saved_origins.pop() {
                log.origin = origin;
            }
            log.depth -= 1;
        }
    }

    fn select_clip_region(&mut self, region: usize) {
        let mut log = self.log.borrow_mut();
        log.selected_region = Some(region);
        log.clip = log.regions.get(&region).copied().unwrap_or_default();
    }

    fn clip_box(&self) -> Option<Rect> {
        Some(self.log.borrow().clip)
    }

    fn fill_placeholder(&mut self, area: &Rect) {
        self.log.borrow_mut().fills.push(*area);
    }

    fn set_viewport_origin(&mut self, origin: Point) -> Option<Point> {
        let mut log = self.log.borrow_mut();
        let previous = log.origin;
        log.origin = origin;
        Some(previous)
    }
}

impl Drop for FakeSurface {
    fn drop(&mut self) {
        if self.owned {
            self.log.borrow_mut().released += 1;
        }
    }
}

pub(crate) struct FakeMenuHost {
    fade: Cell<Option<bool>>,
    fade_writes: RefCell<Vec<bool>>,
    menu: Cell<Option<MenuHandle>>,
    items: RefCell<HashMap<u32, MenuItemDescriptor>>,
    bar_queries: RefCell<Vec<(WindowHandle, i32)>>,
    bar_fails: Cell<bool>,
    forwarded: RefCell<Vec<(WindowHandle, WindowMessage, bool)>>,
    panic_on_forward: Cell<bool>,
    window_dc_fails: Cell<bool>,
    surface: Rc<RefCell<SurfaceLog>>,
}

impl FakeMenuHost {
    pub(crate) fn new() -> Self {
        Self {
            fade: Cell::new(Some(false)),
            fade_writes: RefCell::new(Vec::new()),
            menu: Cell::new(Some(MenuHandle(0x4D))),
            items: RefCell::new(HashMap::new()),
            bar_queries: RefCell::new(Vec::new()),
            bar_fails: Cell::new(false),
            forwarded: RefCell::new(Vec::new()),
            panic_on_forward: Cell::new(false),
            window_dc_fails: Cell::new(false),
            surface: Rc::new(RefCell::new(SurfaceLog::default())),
        }
    }

    pub(crate) fn default_result(&self) -> isize {
        0x5A5A
    }

    pub(crate) fn geometry_for(&self, position: i32) -> BarGeometry {
        BarGeometry {
            bar: Rect {
                left: 10,
                top: 20 * position,
                right: 150,
                bottom: 20 * position + 20,
            },
            menu: MenuHandle(0x4D),
            menu_window: WindowHandle::NULL,
            bar_focused: false,
            item_focused: true,
        }
    }

    pub(crate) fn set_fade(&self, enabled: bool) {
        self.fade.set(Some(enabled));
    }

    pub(crate) fn fail_fade_query(&self) {
        self.fade.set(None);
    }

    pub(crate) fn fade(&self) -> Option<bool> {
        self.fade.get()
    }

    pub(crate) fn fade_writes(&self) -> Vec<bool> {
        self.fade_writes.borrow().clone()
    }

    pub(crate) fn add_item(&self, index: u32, item: MenuItemDescriptor) {
        self.items.borrow_mut().insert(index, item);
    }

    pub(crate) fn detach_menu(&self) {
        self.menu.set(None);
    }

    pub(crate) fn bar_queries(&self) -> Vec<(WindowHandle, i32)> {
        self.bar_queries.borrow().clone()
    }

    pub(crate) fn fail_bar_query(&self) {
        self.bar_fails.set(true);
    }

    pub(crate) fn forwarded(&self) -> Vec<(WindowHandle, WindowMessage, bool)> {
        self.forwarded.borrow().clone()
    }

    pub(crate) fn panic_on_forward(&self) {
        self.panic_on_forward.set(true);
    }

    pub(crate) fn fail_window_dc(&self) {
        self.window_dc_fails.set(true);
    }

    pub(crate) fn set_clip(&self, clip: Rect) {
        self.surface.borrow_mut().clip = clip;
    }

    pub(crate) fn add_region(&self, region: usize, area: Rect) {
        self.surface.borrow_mut().regions.insert(region, area);
    }

    pub(crate) fn surface_log(&self) -> SurfaceLog {
        self.surface.borrow().clone()
    }
}

impl MenuHost for FakeMenuHost {
    type Surface = FakeSurface;

    fn forward_default(&self, window: WindowHandle, message: WindowMessage) -> isize {
        if self.panic_on_forward.get() {
            panic!("default handler failed");
        }
        let fade_on = self.fade.get() == Some(true);
        self.forwarded.borrow_mut().push((window, message, fade_on));
        let mut log = self.surface.borrow_mut();
        let origin = log.origin;
        log.origin_at_forward.push(origin);
        self.default_result()
    }

    fn target_surface(&self, raw_dc: usize) -> Option<FakeSurface> {
        (raw_dc != 0).then(|| FakeSurface {
            log: self.surface.clone(),
            owned: false,
        })
    }

    fn window_surface(&self, _window: WindowHandle) -> Option<FakeSurface> {
        (!self.window_dc_fails.get()).then(|| FakeSurface {
            log: self.surface.clone(),
            owned: true,
        })
    }

    fn selection_fade_enabled(&self) -> Option<bool> {
        self.fade.get()
    }

    fn set_selection_fade(&self, enabled: bool) -> bool {
        self.fade_writes.borrow_mut().push(enabled);
        self.fade.set(Some(enabled));
        true
    }

    fn menu_of(&self, _window: WindowHandle) -> Option<MenuHandle> {
        self.menu.get()
    }

    fn menu_item(&self, _menu: MenuHandle, index: u32) -> Option<MenuItemDescriptor> {
        self.items.borrow().get(&index).copied()
    }

    fn menu_bar_geometry(&self, window: WindowHandle, position: i32) -> Option<BarGeometry> {
        self.bar_queries.borrow_mut().push((window, position));
        (!self.bar_fails.get()).then(|| self.geometry_for(position))
    }
}
