//! Color picker dialog with palette, RGB sliders, numeric fields and hex code
//!
//! All four input surfaces feed a single [`PickerState`]. Each widget handler
//! turns its edit into a [`PickerEvent`]; when the state reports an update,
//! every widget is refreshed from the state under a re-entrancy guard so that
//! programmatic changes are not mistaken for user edits.

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{
    Box as GtkBox, Button, DirectionType, DrawingArea, Entry, EventControllerFocus,
    EventControllerLegacy, GestureDrag, Label, Orientation, PropagationPhase, Scale, Window,
};
use log::{debug, info, warn};
use palette_picker_core::{
    Color, Outcome, PickerEvent, PickerState, Position, Size, CHANNEL_MAX,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::PickerConfig;
use crate::ui::palette_surface;

const CHANNEL_LABELS: [&str; 3] = ["R:", "G:", "B:"];

/// Slider, numeric field and gradient strip of one channel
struct ChannelRow {
    scale: Scale,
    entry: Entry,
    color_map: DrawingArea,
}

/// Widgets that mirror the selected color
struct Widgets {
    dialog: Window,
    palette_area: DrawingArea,
    preview_area: DrawingArea,
    channels: [ChannelRow; 3],
    hex_entry: Entry,
}

struct Shared {
    state: RefCell<PickerState>,
    updating: Cell<bool>,
    widgets: Widgets,
}

impl Shared {
    /// Feed one edit to the state and refresh the widgets if it was accepted
    fn dispatch(&self, event: PickerEvent) -> Outcome {
        if self.updating.get() {
            return Outcome::Unchanged;
        }

        let outcome = match self.state.try_borrow_mut() {
            Ok(mut state) => state.handle(event),
            Err(_) => {
                warn!("Picker state busy, dropping {:?}", event);
                return Outcome::Unchanged;
            }
        };

        if outcome.is_updated() {
            self.refresh();
        }
        outcome
    }

    fn slider_values(&self) -> [u8; 3] {
        self.widgets
            .channels
            .each_ref()
            .map(|row| row.scale.value().round().clamp(0.0, CHANNEL_MAX as f64) as u8)
    }

    fn channel_texts(&self) -> [String; 3] {
        self.widgets
            .channels
            .each_ref()
            .map(|row| row.entry.text().to_string())
    }

    fn commit_channel_texts(&self) -> Outcome {
        self.dispatch(PickerEvent::ChannelTextsCommitted(self.channel_texts()))
    }

    fn commit_hex(&self) -> Outcome {
        let text = self.widgets.hex_entry.text().to_string();
        self.dispatch(PickerEvent::HexCommitted(text))
    }

    fn commit_sliders(&self) -> Outcome {
        self.dispatch(PickerEvent::SliderReleased(self.slider_values()))
    }

    /// Push the state into every widget
    fn refresh(&self) {
        self.updating.set(true);
        {
            let state = self.state.borrow();
            let surfaces = state.surfaces();

            for (i, row) in self.widgets.channels.iter().enumerate() {
                row.scale.set_value(surfaces.sliders[i] as f64);
                if row.entry.text().as_str() != surfaces.channel_texts[i] {
                    row.entry.set_text(&surfaces.channel_texts[i]);
                }
                row.color_map.queue_draw();
            }
            if self.widgets.hex_entry.text().as_str() != surfaces.hex_text {
                self.widgets.hex_entry.set_text(&surfaces.hex_text);
            }
        }
        self.widgets.preview_area.queue_draw();
        self.widgets.palette_area.queue_draw();
        self.updating.set(false);
    }

    fn focus_next(&self) {
        self.widgets.dialog.child_focus(DirectionType::TabForward);
    }
}

pub struct ColorPickerDialog {
    shared: Rc<Shared>,
}

impl ColorPickerDialog {
    /// Build the dialog. `initial` defaults to white.
    pub fn new(parent: Option<&Window>, initial: Option<Color>, config: &PickerConfig) -> Self {
        let dialog = Window::builder()
            .title("Select Color")
            .modal(true)
            .default_width(config.window.width)
            .default_height(config.window.height)
            .resizable(config.window.resizable)
            .build();

        if let Some(parent) = parent {
            dialog.set_transient_for(Some(parent));
        }

        let display_size = config.palette_display.size();
        let palette = palette_surface::resolve_palette(config.palette_path.as_deref());
        let palette_image = match palette_surface::palette_to_surface(&palette) {
            Ok(surface) => Some(surface),
            Err(e) => {
                warn!("Failed to prepare palette surface: {}", e);
                None
            }
        };
        let state = PickerState::new(initial, Some(palette), display_size, config.search);

        let main_box = GtkBox::new(Orientation::Vertical, 8);
        main_box.set_margin_start(12);
        main_box.set_margin_end(12);
        main_box.set_margin_top(12);
        main_box.set_margin_bottom(12);

        // === Palette ===
        let palette_label = Label::new(Some("RGB Color Palette"));
        palette_label.add_css_class("heading");
        palette_label.set_halign(gtk4::Align::Start);
        main_box.append(&palette_label);

        let palette_area = DrawingArea::new();
        palette_area.set_content_width(display_size.width);
        palette_area.set_content_height(display_size.height);
        palette_area.set_hexpand(config.window.resizable);
        palette_area.set_vexpand(config.window.resizable);
        main_box.append(&palette_area);

        // === RGB Controls ===
        let rgb_label = Label::new(Some("RGB"));
        rgb_label.add_css_class("heading");
        rgb_label.set_halign(gtk4::Align::Start);
        rgb_label.set_margin_top(6);
        main_box.append(&rgb_label);

        let channels = CHANNEL_LABELS.map(|label| {
            let (row_box, scale, entry) = Self::create_slider_with_entry(label);
            let color_map = DrawingArea::new();
            color_map.set_size_request(-1, 12);
            color_map.set_margin_start(30); // Align with slider
            color_map.set_margin_end(70); // Align with slider
            main_box.append(&color_map);
            main_box.append(&row_box);
            ChannelRow {
                scale,
                entry,
                color_map,
            }
        });

        // === Hex code and preview ===
        let bottom_box = GtkBox::new(Orientation::Horizontal, 6);
        bottom_box.set_margin_top(6);

        let hex_label = Label::new(Some("Hex:"));
        let hex_entry = Entry::new();
        hex_entry.set_width_chars(8);
        hex_entry.set_max_length(9);
        bottom_box.append(&hex_label);
        bottom_box.append(&hex_entry);

        let spacer = GtkBox::new(Orientation::Horizontal, 0);
        spacer.set_hexpand(true);
        bottom_box.append(&spacer);

        let preview_label = Label::new(Some("Preview"));
        let preview_area = DrawingArea::new();
        preview_area.set_size_request(55, 55);
        bottom_box.append(&preview_label);
        bottom_box.append(&preview_area);
        main_box.append(&bottom_box);

        // === Buttons ===
        let button_box = GtkBox::new(Orientation::Horizontal, 6);
        button_box.set_halign(gtk4::Align::End);
        button_box.set_margin_top(12);

        let select_button = Button::with_label("Select");
        select_button.add_css_class("suggested-action");
        button_box.append(&select_button);
        main_box.append(&button_box);

        dialog.set_child(Some(&main_box));

        let shared = Rc::new(Shared {
            state: RefCell::new(state),
            updating: Cell::new(false),
            widgets: Widgets {
                dialog,
                palette_area,
                preview_area,
                channels,
                hex_entry,
            },
        });

        // Wire up all the handlers
        Self::setup_draw_funcs(&shared, palette_image);
        Self::setup_palette_handlers(&shared);
        Self::setup_slider_handlers(&shared);
        Self::setup_entry_handlers(&shared);
        Self::setup_button_handlers(&shared, select_button);

        shared.refresh();
        info!("Color picker opened with {}", shared.state.borrow().selected());

        Self { shared }
    }

    /// The dialog window, e.g. to attach it to an application
    pub fn window(&self) -> &Window {
        &self.shared.widgets.dialog
    }

    /// The color currently selected in the dialog
    pub fn selected_color(&self) -> Color {
        self.shared.state.borrow().selected()
    }

    fn create_slider_with_entry(label: &str) -> (GtkBox, Scale, Entry) {
        let hbox = GtkBox::new(Orientation::Horizontal, 6);
        let label_widget = Label::new(Some(label));
        label_widget.set_width_chars(3);
        hbox.append(&label_widget);

        let scale = Scale::with_range(Orientation::Horizontal, 0.0, CHANNEL_MAX as f64, 1.0);
        scale.set_hexpand(true);
        scale.set_draw_value(false);
        scale.set_digits(0);
        scale.set_round_digits(0);
        hbox.append(&scale);

        let entry = Entry::new();
        entry.set_width_chars(5);
        entry.set_max_length(6);
        entry.set_input_purpose(gtk4::InputPurpose::Number);
        hbox.append(&entry);

        (hbox, scale, entry)
    }

    fn setup_draw_funcs(shared: &Rc<Shared>, palette_image: Option<cairo::ImageSurface>) {
        let widgets = &shared.widgets;

        let shared_for_palette = shared.clone();
        widgets.palette_area.set_draw_func(move |_, cr, width, height| {
            let Ok(state) = shared_for_palette.state.try_borrow() else {
                return;
            };
            if let Some(surface) = &palette_image {
                palette_surface::draw_palette(cr, surface, width, height);
            }
            palette_surface::draw_crosshair(cr, &state);
        });

        let shared_for_preview = shared.clone();
        widgets.preview_area.set_draw_func(move |_, cr, width, height| {
            let Ok(state) = shared_for_preview.state.try_borrow() else {
                return;
            };
            state.surfaces().preview.apply_to_cairo(cr);
            cr.rectangle(0.0, 0.0, width as f64, height as f64);
            let _ = cr.fill();
        });

        for (channel, row) in widgets.channels.iter().enumerate() {
            let shared_for_map = shared.clone();
            row.color_map.set_draw_func(move |_, cr, width, height| {
                let Ok(state) = shared_for_map.state.try_borrow() else {
                    return;
                };
                let (r, g, b) = state.selected().to_rgb_f64();

                // Gradient of this channel with the other two held fixed
                let gradient = cairo::LinearGradient::new(0.0, 0.0, width as f64, 0.0);
                match channel {
                    0 => {
                        gradient.add_color_stop_rgb(0.0, 0.0, g, b);
                        gradient.add_color_stop_rgb(1.0, 1.0, g, b);
                    }
                    1 => {
                        gradient.add_color_stop_rgb(0.0, r, 0.0, b);
                        gradient.add_color_stop_rgb(1.0, r, 1.0, b);
                    }
                    _ => {
                        gradient.add_color_stop_rgb(0.0, r, g, 0.0);
                        gradient.add_color_stop_rgb(1.0, r, g, 1.0);
                    }
                }

                let _ = cr.set_source(&gradient);
                cr.rectangle(0.0, 0.0, width as f64, height as f64);
                let _ = cr.fill();
            });
        }
    }

    fn setup_palette_handlers(shared: &Rc<Shared>) {
        let area = &shared.widgets.palette_area;

        let drag = GestureDrag::new();
        drag.set_button(gdk4::BUTTON_PRIMARY);

        let shared_for_begin = shared.clone();
        drag.connect_drag_begin(move |_, x, y| {
            shared_for_begin.dispatch(PickerEvent::PalettePressed(Position::new(x, y)));
        });

        let shared_for_update = shared.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                let position = Position::new(start_x + offset_x, start_y + offset_y);
                shared_for_update.dispatch(PickerEvent::PalettePressed(position));
            }
        });
        area.add_controller(drag);

        let shared_for_resize = shared.clone();
        area.connect_resize(move |area, width, height| {
            let moved = match shared_for_resize.state.try_borrow_mut() {
                Ok(mut state) => state.resize_display(Size::new(width, height)),
                Err(_) => false,
            };
            if moved {
                area.queue_draw();
            }
        });
    }

    fn setup_slider_handlers(shared: &Rc<Shared>) {
        for row in &shared.widgets.channels {
            // Live updates while the slider moves
            let shared_for_change = shared.clone();
            row.scale.connect_value_changed(move |_| {
                let values = shared_for_change.slider_values();
                shared_for_change.dispatch(PickerEvent::SliderMoved(values));
            });

            // Commit once the pointer is released. The range handles the
            // release after the capture phase, so read the value on idle.
            let release = EventControllerLegacy::new();
            release.set_propagation_phase(PropagationPhase::Capture);
            let shared_for_release = shared.clone();
            release.connect_event(move |_, event| {
                if event.event_type() == gdk4::EventType::ButtonRelease {
                    let shared = shared_for_release.clone();
                    glib::idle_add_local_once(move || {
                        shared.commit_sliders();
                    });
                }
                glib::Propagation::Proceed
            });
            row.scale.add_controller(release);

            // Keyboard adjustments commit when the slider loses focus
            let focus = EventControllerFocus::new();
            let shared_for_leave = shared.clone();
            focus.connect_leave(move |_| {
                shared_for_leave.commit_sliders();
            });
            row.scale.add_controller(focus);
        }
    }

    fn setup_entry_handlers(shared: &Rc<Shared>) {
        for row in &shared.widgets.channels {
            let shared_for_activate = shared.clone();
            row.entry.connect_activate(move |_| {
                shared_for_activate.commit_channel_texts();
                shared_for_activate.focus_next();
            });

            let focus = EventControllerFocus::new();
            let shared_for_leave = shared.clone();
            focus.connect_leave(move |_| {
                shared_for_leave.commit_channel_texts();
            });
            row.entry.add_controller(focus);
        }

        let hex_entry = &shared.widgets.hex_entry;

        let shared_for_activate = shared.clone();
        hex_entry.connect_activate(move |_| {
            if shared_for_activate.commit_hex().is_updated() {
                shared_for_activate.focus_next();
            }
        });

        let focus = EventControllerFocus::new();
        let shared_for_leave = shared.clone();
        focus.connect_leave(move |_| {
            shared_for_leave.commit_hex();
        });
        hex_entry.add_controller(focus);
    }

    fn setup_button_handlers(shared: &Rc<Shared>, select_button: Button) {
        let shared_for_select = shared.clone();
        select_button.connect_clicked(move |_| {
            shared_for_select.commit_channel_texts();
            shared_for_select.widgets.dialog.close();
        });
    }

    /// Show the dialog and wait until it is closed.
    ///
    /// Returns the color selected at the moment the window closed, whether it
    /// was closed through the Select button or the window manager.
    pub async fn run(self) -> Color {
        use std::future::Future;
        use std::pin::Pin;
        use std::task::{Context, Poll, Waker};

        let result = Rc::new(RefCell::new(None));
        let waker = Rc::new(RefCell::new(None::<Waker>));

        let result_clone = result.clone();
        let waker_clone = waker.clone();
        let shared = self.shared.clone();

        // Handle close to capture result and wake the future
        self.shared.widgets.dialog.connect_close_request(move |_| {
            let color = shared.state.borrow().selected();
            debug!("Color picker closing with {}", color);
            *result_clone.borrow_mut() = Some(color);
            if let Some(waker) = waker_clone.borrow_mut().take() {
                waker.wake();
            }
            glib::Propagation::Proceed
        });

        self.shared.widgets.dialog.present();

        // Create a future that waits for the dialog to close
        struct DialogFuture {
            result: Rc<RefCell<Option<Color>>>,
            waker: Rc<RefCell<Option<Waker>>>,
        }

        impl Future for DialogFuture {
            type Output = Color;

            fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
                if let Some(color) = *self.result.borrow() {
                    Poll::Ready(color)
                } else {
                    *self.waker.borrow_mut() = Some(cx.waker().clone());
                    Poll::Pending
                }
            }
        }

        DialogFuture { result, waker }.await
    }

    /// Show a picker and return the selected color once it closes
    pub async fn pick_color(
        parent: Option<&Window>,
        initial: Option<Color>,
        config: &PickerConfig,
    ) -> Color {
        Self::new(parent, initial, config).run().await
    }
}
