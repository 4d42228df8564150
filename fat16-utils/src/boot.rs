use fat16::Volume;

pub fn boot(volume: &Volume) {
    let boot = volume.boot_record();
    println!("{}", boot);
    if !boot.is_signed() {
        log::warn!("Boot sector is not signed");
    }
    println!("Volume label in use: {}", volume.volume_label());
    let (clusters, free) = (boot.cluster_count(), volume.free_clusters());
    println!("Clusters: {} of {} bytes, {} free", clusters, boot.cluster_size(), free);
}
