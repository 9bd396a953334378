use approx::assert_relative_eq;
use retouch_core::{Channel, PixelLayout, Rgba};
use retouch_editor::{Editor, EditorError, Revision};
use retouch_io::ImageData;
use retouch_ops::{ChannelDepths, GrayscaleMethod, QuantizePolicy};
use std::sync::{Arc, Mutex};

fn gradient(width: u32, height: u32, channels: u32) -> ImageData {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push(((x * 11 + y * 29 + c * 67) % 256) as u8);
            }
        }
    }
    ImageData::from_u8(width, height, channels, data).unwrap()
}

fn loaded(channels: u32) -> Editor {
    let mut editor = Editor::new();
    editor.load_image(gradient(24, 16, channels), None).unwrap();
    editor
}

fn record(editor: &mut Editor) -> Arc<Mutex<Vec<u64>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    editor.subscribe(move |rev: Revision| sink.lock().unwrap().push(rev.get()));
    seen
}

#[test]
fn failed_load_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    retouch_io::write(&good, &gradient(8, 8, 3)).unwrap();

    let mut editor = Editor::new();
    editor.load(&good).unwrap();
    let seen = record(&mut editor);
    let revision = editor.revision();
    let working = editor.working().cloned();

    let bad = dir.path().join("bad.png");
    std::fs::write(&bad, b"not an image at all").unwrap();
    let err = editor.load(&bad).unwrap_err();
    assert!(matches!(err, EditorError::Load { .. }));

    let missing = dir.path().join("missing.png");
    assert!(matches!(editor.load(&missing), Err(EditorError::Load { .. })));

    assert_eq!(editor.revision(), revision);
    assert_eq!(editor.working().cloned(), working);
    assert_eq!(editor.file_path(), Some(good.as_path()));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn each_mutation_notifies_once() {
    let mut editor = Editor::new();
    let seen = record(&mut editor);

    editor.load_image(gradient(5, 5, 4), None).unwrap();
    editor.convert_to_grayscale(GrayscaleMethod::Average).unwrap();
    editor.gamma_correct(1.8).unwrap();
    editor
        .reduce_color_depth(ChannelDepths::uniform(3), QuantizePolicy::Highest)
        .unwrap();
    editor.revert_to_original().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(editor.revision().get(), 5);
}

#[test]
fn queries_and_save_do_not_notify() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = loaded(3);
    let seen = record(&mut editor);

    editor.statistics().unwrap();
    editor.entropy(Channel::Blue).unwrap();
    editor.save(dir.path().join("out.png")).unwrap();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(editor.revision().get(), 1);
}

#[test]
fn unsubscribed_listener_is_silent() {
    let mut editor = loaded(3);
    let seen = Arc::new(Mutex::new(0u32));
    let sink = Arc::clone(&seen);
    let id = editor.subscribe(move |_| *sink.lock().unwrap() += 1);

    editor.gamma_correct(2.2).unwrap();
    assert!(editor.unsubscribe(id));
    editor.gamma_correct(2.2).unwrap();

    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn invalid_parameters_leave_state() {
    let mut editor = loaded(4);
    let seen = record(&mut editor);
    let before = editor.working().cloned();

    for gamma in [0.0, -1.5, f64::NAN, f64::INFINITY] {
        let err = editor.gamma_correct(gamma).unwrap_err();
        assert!(matches!(err, EditorError::InvalidParameter(_)), "{gamma}");
    }
    for depths in [ChannelDepths::uniform(0), ChannelDepths::new(8, 8, 8, 9)] {
        let err = editor
            .reduce_color_depth(depths, QuantizePolicy::Middle)
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidParameter(_)));
    }

    assert_eq!(editor.working().cloned(), before);
    assert_eq!(editor.revision().get(), 1);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn revert_restores_normalized_original() {
    for channels in 1..=4 {
        let mut editor = loaded(channels);
        let normalized = editor.original().unwrap().to_buffer().unwrap();
        assert_eq!(editor.working(), Some(&normalized));

        editor.convert_to_grayscale(GrayscaleMethod::Luminosity).unwrap();
        editor.gamma_correct(0.7).unwrap();
        editor
            .reduce_color_depth(ChannelDepths::new(1, 2, 3, 4), QuantizePolicy::Dynamic)
            .unwrap();
        assert_ne!(editor.working(), Some(&normalized));

        editor.revert_to_original().unwrap();
        assert_eq!(editor.working(), Some(&normalized));
    }
}

#[test]
fn normalization_follows_alpha() {
    assert_eq!(loaded(1).working().unwrap().layout(), PixelLayout::Rgb);
    assert_eq!(loaded(2).working().unwrap().layout(), PixelLayout::Rgba);
    assert_eq!(loaded(3).working().unwrap().layout(), PixelLayout::Rgb);
    assert_eq!(loaded(4).working().unwrap().layout(), PixelLayout::Rgba);
}

#[test]
fn statistics_cached_until_mutation() {
    let mut editor = loaded(3);

    let first = editor.statistics().unwrap().clone();
    let second = editor.statistics().unwrap().clone();
    editor.histogram(Channel::Red).unwrap();
    assert_eq!(first, second);
    assert_eq!(editor.stats_cache().recompute_count(), 1);

    editor.convert_to_grayscale(GrayscaleMethod::Lightness).unwrap();
    editor.entropy(Channel::Green).unwrap();
    editor.entropy(Channel::Alpha).unwrap();
    assert_eq!(editor.stats_cache().recompute_count(), 2);
    assert_eq!(editor.stats_cache().revision(), Some(editor.revision()));
}

#[test]
fn histogram_counts_match_pixel_count() {
    for channels in 1..=4 {
        let mut editor = loaded(channels);
        editor.gamma_correct(2.2).unwrap();
        let pixels = editor.working().unwrap().pixel_count() as u64;
        for channel in Channel::ALL {
            assert_eq!(editor.histogram(channel).unwrap().total(), pixels);
        }
    }
}

#[test]
fn two_pixel_statistics() {
    let mut editor = Editor::new();
    let image = ImageData::from_u8(2, 1, 4, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    editor.load_image(image, None).unwrap();

    let red: Vec<_> = editor.histogram(Channel::Red).unwrap().iter().collect();
    assert_eq!(red, vec![(0, 1), (255, 1)]);
    assert_relative_eq!(editor.entropy(Channel::Red).unwrap(), 1.0);
    assert_relative_eq!(editor.entropy(Channel::Green).unwrap(), 1.0);

    let blue: Vec<_> = editor.histogram(Channel::Blue).unwrap().iter().collect();
    assert_eq!(blue, vec![(0, 2)]);
    assert_eq!(editor.entropy(Channel::Blue).unwrap(), 0.0);

    let alpha: Vec<_> = editor.histogram(Channel::Alpha).unwrap().iter().collect();
    assert_eq!(alpha, vec![(255, 2)]);
    assert_eq!(editor.entropy(Channel::Alpha).unwrap(), 0.0);
}

#[test]
fn grayscale_keeps_alpha() {
    for method in GrayscaleMethod::ALL {
        let mut editor = loaded(4);
        let alphas: Vec<u8> = editor.working().unwrap().pixels().map(|p| p.a).collect();
        editor.convert_to_grayscale(method).unwrap();
        let working = editor.working().unwrap();
        assert!(working.pixels().all(Rgba::is_gray));
        assert_eq!(working.pixels().map(|p| p.a).collect::<Vec<_>>(), alphas);
    }
}

#[test]
fn full_depth_is_identity() {
    for policy in QuantizePolicy::ALL {
        let mut editor = loaded(4);
        let before = editor.working().cloned();
        editor
            .reduce_color_depth(ChannelDepths::uniform(8), policy)
            .unwrap();
        assert_eq!(editor.working().cloned(), before);
        assert_eq!(editor.revision().get(), 2);
    }
}

#[test]
fn rgb_alpha_stays_opaque_after_depth_reduction() {
    let mut editor = loaded(3);
    editor
        .reduce_color_depth(ChannelDepths::uniform(1), QuantizePolicy::Lowest)
        .unwrap();
    let alpha = editor.histogram(Channel::Alpha).unwrap();
    assert_eq!(alpha.len(), 1);
    assert_eq!(alpha.get(255), 24 * 16);
}

#[test]
fn save_then_load_roundtrips_png() {
    let dir = tempfile::tempdir().unwrap();
    for channels in [3, 4] {
        let path = dir.path().join(format!("roundtrip{channels}.png"));
        let mut editor = loaded(channels);
        editor.gamma_correct(1.4).unwrap();
        editor.save(&path).unwrap();

        let mut reopened = Editor::new();
        reopened.load(&path).unwrap();
        assert_eq!(reopened.working(), editor.working());
        assert_eq!(reopened.file_path(), Some(path.as_path()));
    }
}

#[test]
fn save_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Editor::new().save(dir.path().join("x.png")),
        Err(EditorError::NoImage)
    ));

    let editor = loaded(3);
    let err = editor.save(dir.path().join("out.unknown")).unwrap_err();
    assert!(matches!(err, EditorError::Save { .. }));
    let err = editor.save(dir.path().join("no/such/dir/out.png")).unwrap_err();
    assert!(matches!(err, EditorError::Save { .. }));
}
