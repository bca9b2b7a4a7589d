//! Canonical display names for technology and framework slugs.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known slug -> canonical display name mappings.
///
/// Covers the frameworks and platforms people actually type; everything else
/// falls back to simple capitalization.
static DISPLAY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("swift", "Swift"),
        ("swiftui", "SwiftUI"),
        ("swiftdata", "SwiftData"),
        ("uikit", "UIKit"),
        ("appkit", "AppKit"),
        ("foundation", "Foundation"),
        ("corefoundation", "Core Foundation"),
        ("coredata", "Core Data"),
        ("coreml", "Core ML"),
        ("coregraphics", "Core Graphics"),
        ("coreanimation", "Core Animation"),
        ("corelocation", "Core Location"),
        ("coreimage", "Core Image"),
        ("avfoundation", "AVFoundation"),
        ("avkit", "AVKit"),
        ("arkit", "ARKit"),
        ("realitykit", "RealityKit"),
        ("mapkit", "MapKit"),
        ("healthkit", "HealthKit"),
        ("homekit", "HomeKit"),
        ("cloudkit", "CloudKit"),
        ("widgetkit", "WidgetKit"),
        ("storekit", "StoreKit"),
        ("weatherkit", "WeatherKit"),
        ("gameplaykit", "GameplayKit"),
        ("spritekit", "SpriteKit"),
        ("scenekit", "SceneKit"),
        ("webkit", "WebKit"),
        ("pdfkit", "PDFKit"),
        ("pencilkit", "PencilKit"),
        ("passkit", "PassKit"),
        ("eventkit", "EventKit"),
        ("contactskit", "Contacts"),
        ("metal", "Metal"),
        ("metalkit", "MetalKit"),
        ("combine", "Combine"),
        ("observation", "Observation"),
        ("dispatch", "Dispatch"),
        ("xctest", "XCTest"),
        ("xcode", "Xcode"),
        ("testflight", "TestFlight"),
        ("app-store-connect", "App Store Connect"),
        ("ios", "iOS"),
        ("ipados", "iPadOS"),
        ("macos", "macOS"),
        ("watchos", "watchOS"),
        ("tvos", "tvOS"),
        ("visionos", "visionOS"),
        ("occ", "Objective-C"),
        ("objective-c", "Objective-C"),
        ("wwdc", "WWDC"),
    ])
});

/// Maps a free-form technology or framework name to its canonical display
/// name.
///
/// Lookup is case-insensitive. Unknown names fall back to trimming and
/// uppercasing the first character; the empty string maps to itself.
#[must_use]
pub fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    let slug = trimmed.to_lowercase();

    if let Some(display) = DISPLAY_NAMES.get(slug.as_str()) {
        return (*display).to_string();
    }

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
